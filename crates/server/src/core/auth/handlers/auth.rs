//! Registration and login handlers

use crate::core::config::AppState;
use crate::core::error::{Error, Result};
use crate::core::extract::JsonBody;
use crate::core::models::{CredentialsRequest, LoginResponse, RegisterResponse};
use crate::core::store::StoreError;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    info!("POST /register - {}", req.login);

    if req.login.is_empty() || req.password.is_empty() {
        return Err(Error::BadRequest(
            "Login and password must not be empty".to_string(),
        ));
    }

    match state.store.get_user_by_login(&req.login).await {
        Ok(_) => return Err(Error::UserAlreadyExists),
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }

    let password_hash = state.passwords.hash(&req.password).await?;

    let user = match state.store.create_user(&req.login, &password_hash).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration for the same login
        Err(StoreError::Conflict) => return Err(Error::UserAlreadyExists),
        Err(e) => return Err(e.into()),
    };

    info!("User {} registered (id {})", user.login, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            login: user.login,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<LoginResponse>> {
    info!("POST /login - {}", req.login);

    let user = match state.store.get_user_by_login(&req.login).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            // Pay the same bcrypt cost as a wrong password
            state.passwords.verify_unknown(&req.password).await?;
            warn!("Login failed for {}: unknown login", req.login);
            return Err(Error::LoginFail);
        }
        Err(e) => return Err(e.into()),
    };

    if !state
        .passwords
        .verify(&req.password, &user.password_hash)
        .await?
    {
        warn!("Login failed for {}: wrong password", req.login);
        return Err(Error::LoginFail);
    }

    let token = state
        .tokens
        .issue(user.id, &user.login)
        .map_err(Error::Token)?;

    info!("User {} logged in", user.login);

    Ok(Json(LoginResponse {
        token,
        message: "Login successful".to_string(),
    }))
}
