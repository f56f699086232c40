//! Contact and subscriber repository tests against a mock connection.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use uuid::Uuid;

use crate::entities::{contact_messages, subscribers};
use crate::repositories::{ContactRepository, CreateContactInput, SubscriberRepository};

fn message() -> contact_messages::Model {
    contact_messages::Model {
        id: Uuid::now_v7(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        subject: "Hello there".to_string(),
        created_at: Utc::now().into(),
    }
}

fn subscriber() -> subscribers::Model {
    subscribers::Model {
        id: Uuid::now_v7(),
        email: "reader@example.com".to_string(),
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_contact_create() {
    let stored = message();
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .into_connection()
        .into();
    let repo = ContactRepository::new(db);

    let created = repo
        .create(CreateContactInput {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello there".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created, stored);
}

#[tokio::test]
async fn test_contact_delete_returns_message() {
    let stored = message();
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection()
        .into();
    let repo = ContactRepository::new(db);

    assert_eq!(repo.delete(stored.id).await.unwrap(), Some(stored));
}

#[tokio::test]
async fn test_contact_delete_missing() {
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<contact_messages::Model>::new()])
        .into_connection()
        .into();
    let repo = ContactRepository::new(db);

    assert_eq!(repo.delete(Uuid::now_v7()).await.unwrap(), None);
}

#[tokio::test]
async fn test_subscriber_list() {
    let rows = vec![subscriber(), subscriber()];
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows.clone()])
        .into_connection()
        .into();
    let repo = SubscriberRepository::new(db);

    assert_eq!(repo.list().await.unwrap(), rows);
}

#[tokio::test]
async fn test_subscriber_delete_race_is_none() {
    let stored = subscriber();
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection()
        .into();
    let repo = SubscriberRepository::new(db);

    assert_eq!(repo.delete(stored.id).await.unwrap(), None);
}
