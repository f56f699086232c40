//! Post repository tests against a mock connection.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use crate::entities::posts;
use crate::repositories::PostRepository;
use herald_core::content::{
    ContentError, ContentKind, ContentPatch, ContentRepository, NewContent,
};

fn post(kind: &str, title: &str, image_name: Option<&str>) -> posts::Model {
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap().into();
    posts::Model {
        id: Uuid::now_v7(),
        kind: kind.to_string(),
        title: title.to_string(),
        content: format!("{title} body"),
        author: "Admin".to_string(),
        image_name: image_name.map(str::to_string),
        created_at: at,
        updated_at: at,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_insert_maps_returned_row() {
    let stored = post("news", "Launch", Some("1-a.png"));
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .into_connection()
        .into();
    let repo = PostRepository::news(db);

    let record = repo
        .insert(NewContent {
            title: "Launch".to_string(),
            content: "Launch body".to_string(),
            author: "Admin".to_string(),
            image_name: Some("1-a.png".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(record.id, stored.id);
    assert_eq!(record.kind, ContentKind::News);
    assert_eq!(record.image_name.as_deref(), Some("1-a.png"));
    assert_eq!(record.created_at, stored.created_at.with_timezone(&Utc));
}

#[tokio::test]
async fn test_find_by_id_missing_is_none() {
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<posts::Model>::new()])
        .into_connection()
        .into();
    let repo = PostRepository::blogs(db);

    assert!(repo.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_page_returns_rows_and_total() {
    let first = post("blog", "first", None);
    let second = post("blog", "second", Some("2-b.png"));
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(12)]])
        .append_query_results([vec![first.clone(), second.clone()]])
        .into_connection()
        .into();
    let repo = PostRepository::blogs(db.clone());

    let (records, total) = repo.find_page(10, 10).await.unwrap();

    assert_eq!(total, 12);
    let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    drop(repo);
    let db = Arc::into_inner(db).expect("repository dropped");
    assert_eq!(db.into_transaction_log().len(), 2);
}

#[tokio::test]
async fn test_update_returns_updated_record() {
    let mut updated = post("blog", "New title", Some("2-b.png"));
    updated.updated_at = Utc::now().into();
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![updated.clone()]])
        .into_connection()
        .into();
    let repo = PostRepository::blogs(db);

    let record = repo
        .update_by_id(
            updated.id,
            ContentPatch {
                title: "New title".to_string(),
                content: "New title body".to_string(),
                author: "Admin".to_string(),
                image_name: Some("2-b.png".to_string()),
            },
        )
        .await
        .unwrap()
        .expect("row updated");

    assert_eq!(record.title, "New title");
    assert_eq!(record.image_name.as_deref(), Some("2-b.png"));
}

#[tokio::test]
async fn test_update_missing_row_is_none() {
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<posts::Model>::new()])
        .into_connection()
        .into();
    let repo = PostRepository::blogs(db);

    let patch = ContentPatch {
        title: "T".to_string(),
        content: "C".to_string(),
        author: "Admin".to_string(),
        image_name: None,
    };
    assert!(repo.update_by_id(Uuid::now_v7(), patch).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_returns_snapshot() {
    let stored = post("blog", "gone", Some("3-c.png"));
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection()
        .into();
    let repo = PostRepository::blogs(db);

    let removed = repo.delete_by_id(stored.id).await.unwrap().expect("deleted");
    assert_eq!(removed.id, stored.id);
    assert_eq!(removed.image_name.as_deref(), Some("3-c.png"));
}

#[tokio::test]
async fn test_delete_missing_is_none() {
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<posts::Model>::new()])
        .into_connection()
        .into();
    let repo = PostRepository::news(db);

    assert!(repo.delete_by_id(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_database_error_maps_to_persistence() {
    let db: Arc<DatabaseConnection> = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection()
        .into();
    let repo = PostRepository::blogs(db);

    let err = repo.find_by_id(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, ContentError::Persistence(msg) if msg.contains("connection reset")));
}
