//! Credential storage
//!
//! Users and notes live behind the [`CredentialStore`] trait so handlers never
//! see SQL. [`SqliteStore`] is the durable implementation.

pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::core::models::{Note, User};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a [`CredentialStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    Conflict,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::Conflict`] if the login is taken.
    async fn create_user(&self, login: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Fails with [`StoreError::NotFound`] if no user has this login.
    async fn get_user_by_login(&self, login: &str) -> Result<User, StoreError>;

    async fn create_note(&self, name: &str, user_id: i64) -> Result<Note, StoreError>;

    /// Notes owned by `user_id`, oldest first.
    async fn get_notes_by_user_id(&self, user_id: i64) -> Result<Vec<Note>, StoreError>;
}
