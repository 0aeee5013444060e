use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::db::{Feedback, NewFeedback, NewRule, Rule};
use crate::error::TranslatorError;
use crate::middleware::JsonBody;
use crate::router::TranslatorState;
use crate::types::{HealthResponse, PromptBody};

pub async fn health_handler(State(state): State<TranslatorState>) -> Json<HealthResponse> {
    let database = if state.service.is_store_available() {
        "connected"
    } else {
        "unavailable"
    };
    Json(HealthResponse {
        message: "Translation admin interface".to_string(),
        database: database.to_string(),
    })
}

pub async fn list_rules_handler(
    State(state): State<TranslatorState>,
) -> Result<Json<Vec<Rule>>, TranslatorError> {
    let rules = state.service.storage()?.list_rules().await?;
    Ok(Json(rules))
}

pub async fn get_rule_handler(
    State(state): State<TranslatorState>,
    Path(id): Path<i64>,
) -> Result<Json<Rule>, TranslatorError> {
    let rule = state.service.storage()?.get_rule(id).await?;
    Ok(Json(rule))
}

pub async fn create_rule_handler(
    State(state): State<TranslatorState>,
    JsonBody(rule): JsonBody<NewRule>,
) -> Result<(StatusCode, Json<Rule>), TranslatorError> {
    let stored = state.service.storage()?.add_rule(rule).await?;
    info!(id = stored.id, "rule added");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_rule_handler(
    State(state): State<TranslatorState>,
    Path(id): Path<i64>,
    JsonBody(rule): JsonBody<NewRule>,
) -> Result<Json<Rule>, TranslatorError> {
    let stored = state.service.storage()?.update_rule(id, rule).await?;
    info!(id, "rule updated");
    Ok(Json(stored))
}

pub async fn delete_rule_handler(
    State(state): State<TranslatorState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, TranslatorError> {
    state.service.storage()?.delete_rule(id).await?;
    info!(id, "rule deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_feedbacks_handler(
    State(state): State<TranslatorState>,
) -> Result<Json<Vec<Feedback>>, TranslatorError> {
    let feedbacks = state.service.storage()?.list_feedbacks().await?;
    Ok(Json(feedbacks))
}

pub async fn create_feedback_handler(
    State(state): State<TranslatorState>,
    JsonBody(feedback): JsonBody<NewFeedback>,
) -> Result<(StatusCode, Json<Feedback>), TranslatorError> {
    let stored = state.service.storage()?.add_feedback(feedback).await?;
    info!(id = stored.id, "feedback added");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn delete_feedback_handler(
    State(state): State<TranslatorState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, TranslatorError> {
    state.service.storage()?.delete_feedback(id).await?;
    info!(id, "feedback deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_prompt_handler(
    State(state): State<TranslatorState>,
) -> Result<Json<PromptBody>, TranslatorError> {
    let prompt = state.service.templates().read().await?;
    Ok(Json(PromptBody { prompt }))
}

pub async fn set_prompt_handler(
    State(state): State<TranslatorState>,
    JsonBody(body): JsonBody<PromptBody>,
) -> Result<StatusCode, TranslatorError> {
    state.service.templates().save(&body.prompt).await?;
    Ok(StatusCode::NO_CONTENT)
}
