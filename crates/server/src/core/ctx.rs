use crate::core::auth::token::Claims;
use crate::core::error::{Error, Result};
use axum::{extract::FromRequestParts, http::request::Parts};

/// Verified identity of the caller, placed in request extensions by the auth middleware.
#[derive(Clone, Debug)]
pub struct Ctx {
    claims: Claims,
}

impl Ctx {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> i64 {
        self.claims.user_id
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::AuthFailCtxNotInRequestExt)
    }
}
