use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::Result;
use crate::core::extract::JsonBody;
use crate::core::models::{CreateNoteRequest, Note};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

/// GET /notes
pub async fn list_notes(State(state): State<AppState>, ctx: Ctx) -> Result<Json<Vec<Note>>> {
    info!("GET /notes - {} ({})", ctx.username(), ctx.user_id());

    let notes = state.store.get_notes_by_user_id(ctx.user_id()).await?;

    Ok(Json(notes))
}

/// POST /notes
///
/// The owner always comes from `ctx`, never from the body.
pub async fn create_note(
    State(state): State<AppState>,
    ctx: Ctx,
    JsonBody(req): JsonBody<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>)> {
    info!("POST /notes - {} ({})", ctx.username(), ctx.user_id());

    let note = state.store.create_note(&req.name, ctx.user_id()).await?;

    Ok((StatusCode::CREATED, Json(note)))
}
