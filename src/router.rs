use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::handlers::admin::{
    create_feedback_handler, create_rule_handler, delete_feedback_handler, delete_rule_handler,
    get_prompt_handler, get_rule_handler, health_handler, list_feedbacks_handler,
    list_rules_handler, set_prompt_handler, update_rule_handler,
};
use crate::handlers::translate::{root_handler, translate_handler};
use crate::service::TranslationService;

#[derive(Clone)]
pub struct TranslatorState {
    pub service: Arc<TranslationService>,
    pub max_body_bytes: usize,
}

impl TranslatorState {
    pub fn new(service: TranslationService, max_body_bytes: usize) -> Self {
        Self {
            service: Arc::new(service),
            max_body_bytes,
        }
    }
}

/// Public surface: greeting and translation.
pub fn translator_router(state: TranslatorState) -> Router {
    let limit = state.max_body_bytes;
    Router::new()
        .route("/", get(root_handler))
        .route("/translate", post(translate_handler))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

/// Admin surface: rule/feedback CRUD, prompt editing and a translator.
pub fn admin_router(state: TranslatorState) -> Router {
    let limit = state.max_body_bytes;
    Router::new()
        .route("/admin/health", get(health_handler))
        .route(
            "/admin/rules",
            get(list_rules_handler).post(create_rule_handler),
        )
        .route(
            "/admin/rules/{id}",
            get(get_rule_handler)
                .put(update_rule_handler)
                .delete(delete_rule_handler),
        )
        .route(
            "/admin/feedbacks",
            get(list_feedbacks_handler).post(create_feedback_handler),
        )
        .route("/admin/feedbacks/{id}", delete(delete_feedback_handler))
        .route(
            "/admin/prompt",
            get(get_prompt_handler).put(set_prompt_handler),
        )
        .route("/admin/translate", post(translate_handler))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}
