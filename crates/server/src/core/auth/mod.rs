//! Authentication Module
//!
//! Token issuance and verification, password hashing, the bearer-token
//! middleware that guards protected routes, and the register/login handlers.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::mw_require_auth;
pub use password::PasswordHasher;
pub use token::{Claims, TokenCodec, TokenError};
