//! Newsletter subscriber repository for database operations.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::subscribers;

/// Subscriber repository.
#[derive(Debug)]
pub struct SubscriberRepository {
    db: Arc<DatabaseConnection>,
}

impl SubscriberRepository {
    /// Creates a new subscriber repository.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn conn(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Records a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, email: &str) -> Result<subscribers::Model, DbErr> {
        subscribers::ActiveModel {
            id: Set(Uuid::now_v7()),
            email: Set(email.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.conn())
        .await
    }

    /// Lists all subscribers, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<subscribers::Model>, DbErr> {
        subscribers::Entity::find()
            .order_by_asc(subscribers::Column::CreatedAt)
            .all(self.conn())
            .await
    }

    /// Removes a subscriber, returning it when it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: Uuid) -> Result<Option<subscribers::Model>, DbErr> {
        let Some(existing) = subscribers::Entity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };

        let result = subscribers::Entity::delete_many()
            .filter(subscribers::Column::Id.eq(id))
            .exec(self.conn())
            .await?;

        Ok((result.rows_affected > 0).then_some(existing))
    }
}
