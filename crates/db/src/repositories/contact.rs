//! Contact message repository for database operations.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::contact_messages;

/// Input for storing a contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateContactInput {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Message body.
    pub subject: String,
}

/// Contact message repository.
#[derive(Debug)]
pub struct ContactRepository {
    db: Arc<DatabaseConnection>,
}

impl ContactRepository {
    /// Creates a new contact message repository.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn conn(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Stores a contact message.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateContactInput,
    ) -> Result<contact_messages::Model, DbErr> {
        contact_messages::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            email: Set(input.email),
            subject: Set(input.subject),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.conn())
        .await
    }

    /// Lists all contact messages, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<contact_messages::Model>, DbErr> {
        contact_messages::Entity::find()
            .order_by_asc(contact_messages::Column::CreatedAt)
            .all(self.conn())
            .await
    }

    /// Finds a contact message by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<contact_messages::Model>, DbErr> {
        contact_messages::Entity::find_by_id(id).one(self.conn()).await
    }

    /// Deletes a contact message, returning it when it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: Uuid) -> Result<Option<contact_messages::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let result = contact_messages::Entity::delete_many()
            .filter(contact_messages::Column::Id.eq(id))
            .exec(self.conn())
            .await?;

        Ok((result.rows_affected > 0).then_some(existing))
    }
}
