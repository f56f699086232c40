//! Initial database migration.
//!
//! Creates the posts, contact_messages and subscribers tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CONTENT
        // ============================================================
        db.execute_unprepared(POSTS_SQL).await?;

        // ============================================================
        // PART 2: AUDIENCE
        // ============================================================
        db.execute_unprepared(CONTACT_MESSAGES_SQL).await?;
        db.execute_unprepared(SUBSCRIBERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS subscribers, contact_messages, posts CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const POSTS_SQL: &str = r"
-- Blog posts and news items, one optional image each
CREATE TABLE posts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    kind VARCHAR(16) NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    author VARCHAR(255) NOT NULL DEFAULT 'Admin',
    image_name VARCHAR(512),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_posts_kind CHECK (kind IN ('blog', 'news'))
);

CREATE INDEX idx_posts_kind_id ON posts(kind, id);
";

const CONTACT_MESSAGES_SQL: &str = r"
CREATE TABLE contact_messages (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    subject TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SUBSCRIBERS_SQL: &str = r"
CREATE TABLE subscribers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_subscribers_email ON subscribers(email);
";
