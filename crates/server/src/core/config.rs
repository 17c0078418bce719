//! Notes server configuration

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Duration;
use tracing::warn;

use crate::core::auth::password::{PasswordHasher, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::core::auth::token::{TokenCodec, DEFAULT_TOKEN_TTL_HOURS};
use crate::core::store::CredentialStore;

/// Shortest HMAC secret accepted from the environment.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest token lifetime accepted from the environment (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Configuration for the notes server
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// HMAC secret for signing tokens
    pub jwt_secret: Vec<u8>,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite://notes.sqlite".to_string(),
            jwt_secret: random_secret(),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ServerConfig {
    /// Build config from `NOTES_ADDR`, `DATABASE_URL`, `JWT_SECRET`,
    /// `TOKEN_TTL_HOURS` and `BCRYPT_COST`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("NOTES_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("Invalid NOTES_ADDR: {}", addr))?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }

        match lookup("JWT_SECRET") {
            Some(secret) if secret.len() >= MIN_SECRET_LEN => {
                config.jwt_secret = secret.into_bytes();
            }
            Some(_) => bail!("JWT_SECRET must be at least {} bytes", MIN_SECRET_LEN),
            None => {
                warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
            }
        }

        if let Some(hours) = lookup("TOKEN_TTL_HOURS") {
            let hours: i64 = hours
                .parse()
                .with_context(|| format!("Invalid TOKEN_TTL_HOURS: {}", hours))?;
            if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
                bail!("TOKEN_TTL_HOURS must be between 1 and {}", MAX_TOKEN_TTL_HOURS);
            }
            config.token_ttl = Duration::try_hours(hours)
                .with_context(|| format!("TOKEN_TTL_HOURS out of range: {}", hours))?;
        }

        if let Some(cost) = lookup("BCRYPT_COST") {
            let cost: u32 = cost
                .parse()
                .with_context(|| format!("Invalid BCRYPT_COST: {}", cost))?;
            if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                bail!(
                    "BCRYPT_COST must be between {} and {}",
                    MIN_BCRYPT_COST,
                    MAX_BCRYPT_COST
                );
            }
            config.bcrypt_cost = cost;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

fn random_secret() -> Vec<u8> {
    let mut secret = Vec::with_capacity(32);
    secret.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    secret.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    secret
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub tokens: Arc<TokenCodec>,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(config: &ServerConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            tokens: Arc::new(TokenCodec::new(&config.jwt_secret, config.token_ttl)),
            passwords: PasswordHasher::new(config.bcrypt_cost),
        }
    }
}
