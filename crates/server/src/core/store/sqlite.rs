//! SQLite-backed credential store

use super::{CredentialStore, StoreError};
use crate::core::models::{Note, User};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url` and apply the schema.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Self { pool };
        store.init_schema().await?;

        info!("[Store] Opened {}", url);
        Ok(store)
    }

    /// Private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the pool
    /// is pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                login TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn create_user(&self, login: &str, password_hash: &str) -> Result<User, StoreError> {
        let result =
            sqlx::query("INSERT INTO users (login, password_hash, created_at) VALUES (?, ?, ?)")
                .bind(login)
                .bind(password_hash)
                .bind(Utc::now().to_rfc3339())
                .execute(&self.pool)
                .await;

        match result {
            Ok(done) => Ok(User {
                id: done.last_insert_rowid(),
                login: login.to_string(),
                password_hash: password_hash.to_string(),
            }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user_by_login(&self, login: &str) -> Result<User, StoreError> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, login, password_hash FROM users WHERE login = ?")
                .bind(login)
                .fetch_optional(&self.pool)
                .await?;

        let (id, login, password_hash) = row.ok_or(StoreError::NotFound)?;
        Ok(User {
            id,
            login,
            password_hash,
        })
    }

    async fn create_note(&self, name: &str, user_id: i64) -> Result<Note, StoreError> {
        let done = sqlx::query("INSERT INTO notes (name, user_id, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(user_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(Note {
            id: done.last_insert_rowid(),
            name: name.to_string(),
            user_id,
        })
    }

    async fn get_notes_by_user_id(&self, user_id: i64) -> Result<Vec<Note>, StoreError> {
        let rows: Vec<(i64, String, i64)> =
            sqlx::query_as("SELECT id, name, user_id FROM notes WHERE user_id = ? ORDER BY id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, user_id)| Note { id, name, user_id })
            .collect())
    }
}
