//! Post repository for database operations.
//!
//! Implements content persistence for one content kind using SeaORM.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::posts;
use herald_core::content::{
    ContentError, ContentKind, ContentPatch, ContentRecord, ContentRepository, NewContent,
};

/// Post repository scoped to one content kind.
#[derive(Debug)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
    kind: ContentKind,
}

impl PostRepository {
    /// Create a repository for `kind`.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, kind: ContentKind) -> Self {
        Self { db, kind }
    }

    /// Repository for blog posts.
    #[must_use]
    pub fn blogs(db: Arc<DatabaseConnection>) -> Self {
        Self::new(db, ContentKind::Blog)
    }

    /// Repository for news items.
    #[must_use]
    pub fn news(db: Arc<DatabaseConnection>) -> Self {
        Self::new(db, ContentKind::News)
    }

    fn conn(&self) -> &DatabaseConnection {
        &self.db
    }

    fn scoped(&self) -> sea_orm::Select<posts::Entity> {
        posts::Entity::find().filter(posts::Column::Kind.eq(self.kind.as_str()))
    }
}

impl ContentRepository for PostRepository {
    async fn insert(&self, input: NewContent) -> Result<ContentRecord, ContentError> {
        let now = Utc::now().into();
        let active_model = posts::ActiveModel {
            id: Set(Uuid::now_v7()),
            kind: Set(self.kind.as_str().to_string()),
            title: Set(input.title),
            content: Set(input.content),
            author: Set(input.author),
            image_name: Set(input.image_name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.conn()).await.map_err(persistence)?;

        Ok(to_domain(model, self.kind))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>, ContentError> {
        let model = self
            .scoped()
            .filter(posts::Column::Id.eq(id))
            .one(self.conn())
            .await
            .map_err(persistence)?;

        Ok(model.map(|m| to_domain(m, self.kind)))
    }

    async fn find_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<ContentRecord>, u64), ContentError> {
        let total = self.scoped().count(self.conn()).await.map_err(persistence)?;

        // v7 ids sort by creation time.
        let models = self
            .scoped()
            .order_by_asc(posts::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(persistence)?;

        let records = models
            .into_iter()
            .map(|m| to_domain(m, self.kind))
            .collect();
        Ok((records, total))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: ContentPatch,
    ) -> Result<Option<ContentRecord>, ContentError> {
        let active_model = posts::ActiveModel {
            id: Set(id),
            kind: NotSet,
            title: Set(patch.title),
            content: Set(patch.content),
            author: Set(patch.author),
            image_name: patch.image_name.map_or(NotSet, |key| Set(Some(key))),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        match active_model.update(self.conn()).await {
            Ok(model) => Ok(Some(to_domain(model, self.kind))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(persistence(e)),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>, ContentError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let result = posts::Entity::delete_many()
            .filter(posts::Column::Id.eq(id))
            .filter(posts::Column::Kind.eq(self.kind.as_str()))
            .exec(self.conn())
            .await
            .map_err(persistence)?;

        Ok((result.rows_affected > 0).then_some(existing))
    }
}

fn persistence(e: DbErr) -> ContentError {
    ContentError::persistence(e.to_string())
}

/// Convert database model to domain model.
pub(crate) fn to_domain(model: posts::Model, kind: ContentKind) -> ContentRecord {
    ContentRecord {
        id: model.id,
        kind: ContentKind::parse(&model.kind).unwrap_or(kind),
        title: model.title,
        content: model.content,
        author: model.author,
        image_name: model.image_name,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
