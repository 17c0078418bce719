use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::{Error, Result};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

const BEARER_PREFIX: &str = "Bearer ";

/// Reject the request unless it carries a valid `Authorization: Bearer <token>`.
///
/// On success the verified claims are stored as a [`Ctx`] in the request
/// extensions. The store is never consulted here.
pub async fn mw_require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    debug!("MIDDLEWARE: require_auth");

    let auth_header = match req.headers().get(header::AUTHORIZATION) {
        Some(h) => h.to_str().map_err(|_| Error::AuthFailTokenWrongFormat)?,
        None => {
            debug!("No Authorization header");
            return Err(Error::AuthFailNoToken);
        }
    };

    let token = match auth_header.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => token,
        _ => {
            debug!("Authorization header is not a bearer token");
            return Err(Error::AuthFailTokenWrongFormat);
        }
    };

    let claims = state.tokens.verify(token).map_err(|e| {
        debug!("Token rejected: {}", e);
        Error::AuthFailInvalidToken(e)
    })?;
    debug!(
        "Authenticated {} (id {}) until {}",
        claims.username,
        claims.user_id,
        claims.expires_at()
    );

    req.extensions_mut().insert(Ctx::new(claims));

    Ok(next.run(req).await)
}
