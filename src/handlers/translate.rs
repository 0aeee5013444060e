use axum::{Json, extract::State};

use crate::error::TranslatorError;
use crate::middleware::JsonBody;
use crate::router::TranslatorState;
use crate::types::{MessageResponse, TranslationRequest, TranslationResult};

/// GET / -> greeting.
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the translation service!".to_string(),
    })
}

/// POST /translate -> Polish translation of the given German text.
pub async fn translate_handler(
    State(state): State<TranslatorState>,
    JsonBody(req): JsonBody<TranslationRequest>,
) -> Result<Json<TranslationResult>, TranslatorError> {
    let result = state.service.translate(&req.text).await?;
    Ok(Json(result))
}
