use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TranslatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("failed to connect to the database")]
    StoreUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("prompt template {} does not exist", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("failed to read prompt template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write prompt template {}: {source}", path.display())]
    TemplateWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { status: StatusCode, message: String },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Completion API error ({status}): {message}")]
    UpstreamApi { status: StatusCode, message: String },

    #[error("Malformed completion response: {0}")]
    MalformedCompletion(String),
}

impl From<figment::Error> for TranslatorError {
    fn from(e: figment::Error) -> Self {
        TranslatorError::Config(Box::new(e))
    }
}

impl IntoResponse for TranslatorError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            TranslatorError::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody::new("STORE_UNAVAILABLE", "Failed to connect to the database."),
            ),
            TranslatorError::NotFound { kind, id } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody::new("NOT_FOUND", format!("{kind} {id} not found.")),
            ),
            TranslatorError::TemplateMissing { .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody::new("NOT_FOUND", "Prompt template has not been set."),
            ),
            TranslatorError::TemplateRead { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody::new("TEMPLATE_UNAVAILABLE", "Prompt template could not be read."),
            ),
            TranslatorError::InvalidRequest { status, message } => {
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "INVALID_REQUEST"
                };
                (status, ApiErrorBody::new(code, message))
            }
            TranslatorError::Transport(_) | TranslatorError::UrlParse(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody::new("BAD_GATEWAY", "Completion service is unavailable."),
            ),
            TranslatorError::UpstreamApi { status, message } => {
                let (status, code) = match status {
                    StatusCode::TOO_MANY_REQUESTS => (status, "RATE_LIMIT"),
                    StatusCode::UNAUTHORIZED => (status, "UNAUTHORIZED"),
                    StatusCode::FORBIDDEN => (status, "FORBIDDEN"),
                    StatusCode::NOT_FOUND => (status, "NOT_FOUND"),
                    _ => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
                };
                (status, ApiErrorBody::new(code, message))
            }
            TranslatorError::MalformedCompletion(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody::new(
                    "MALFORMED_COMPLETION",
                    "Completion service returned an unusable response.",
                ),
            ),
            TranslatorError::DatabaseError(_)
            | TranslatorError::TemplateWrite { .. }
            | TranslatorError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody::new("INTERNAL_ERROR", "An internal server error occurred."),
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
