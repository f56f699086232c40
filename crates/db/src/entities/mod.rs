//! `SeaORM` entity definitions.

pub mod contact_messages;
pub mod posts;
pub mod subscribers;
