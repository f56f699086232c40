//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod contact;
pub mod post;
pub mod subscriber;

pub use contact::{ContactRepository, CreateContactInput};
pub use post::PostRepository;
pub use subscriber::SubscriberRepository;

#[cfg(test)]
mod audience_tests;
#[cfg(test)]
mod post_tests;
