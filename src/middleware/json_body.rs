use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::TranslatorError;

/// `Json<T>` whose rejections (bad JSON, wrong content type, body over the
/// configured limit) render as the standard error body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = TranslatorError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> TranslatorError {
    let status = rejection.status();
    let message = rejection.body_text();
    debug!(status = %status, reason = %message, "rejected request body");
    TranslatorError::InvalidRequest { status, message }
}
