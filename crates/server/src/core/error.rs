use crate::core::auth::token::TokenError;
use crate::core::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum Error {
    // Auth Errors
    LoginFail,
    AuthFailNoToken,
    AuthFailTokenWrongFormat,
    AuthFailInvalidToken(TokenError),
    AuthFailCtxNotInRequestExt,

    // Model Errors
    UserAlreadyExists,

    // Generic
    BadRequest(String),
    Store(StoreError),
    Token(TokenError),
    Internal(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::LoginFail
            | Error::AuthFailNoToken
            | Error::AuthFailTokenWrongFormat
            | Error::AuthFailInvalidToken(_) => StatusCode::UNAUTHORIZED,
            Error::UserAlreadyExists => StatusCode::CONFLICT,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::AuthFailCtxNotInRequestExt
            | Error::Store(_)
            | Error::Token(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            Error::LoginFail => "Invalid credentials".to_string(),
            // One message for every gate failure; the kind is only logged.
            Error::AuthFailNoToken
            | Error::AuthFailTokenWrongFormat
            | Error::AuthFailInvalidToken(_) => "Unauthorized".to_string(),
            Error::UserAlreadyExists => "User already exists".to_string(),
            Error::BadRequest(msg) => msg,
            Error::AuthFailCtxNotInRequestExt => {
                error!("Auth context missing from a protected route");
                "Internal server error".to_string()
            }
            Error::Store(e) => {
                error!("Store error: {}", e);
                "Database error".to_string()
            }
            Error::Token(e) => {
                error!("Token error: {}", e);
                "Token creation failed".to_string()
            }
            Error::Internal(msg) => {
                error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message
            }
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}
