//! Core Router
//!
//! Public auth routes plus the notes routes behind `mw_require_auth`.

use crate::core::auth::handlers as auth_handlers;
use crate::core::auth::mw_require_auth;
use crate::core::notes;
use crate::core::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    // route_layer: the gate only runs for matched routes, before any extractor.
    let protected = Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw_require_auth,
        ));

    Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/health", get(health_check))
        .merge(protected)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
