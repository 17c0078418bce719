//! Request extractors

use crate::core::error::Error;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use tracing::debug;

/// `Json<T>` whose rejections become `400` with the crate's error body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(Error::BadRequest("Invalid request body".to_string()))
            }
        }
    }
}
