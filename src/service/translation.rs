use crate::api::OpenAiClient;
use crate::db::TranslatorStorage;
use crate::error::TranslatorError;
use crate::prompt::{PromptTemplateStore, assemble};
use crate::types::TranslationResult;
use tracing::{debug, info};

/// Composes the prompt from its three sources and forwards it to the model.
///
/// `storage` is `None` when the database could not be reached at startup;
/// every store-dependent operation then fails with `StoreUnavailable`.
#[derive(Clone)]
pub struct TranslationService {
    storage: Option<TranslatorStorage>,
    templates: PromptTemplateStore,
    client: OpenAiClient,
}

impl TranslationService {
    pub fn new(
        storage: Option<TranslatorStorage>,
        templates: PromptTemplateStore,
        client: OpenAiClient,
    ) -> Self {
        Self {
            storage,
            templates,
            client,
        }
    }

    pub fn storage(&self) -> Result<&TranslatorStorage, TranslatorError> {
        self.storage.as_ref().ok_or(TranslatorError::StoreUnavailable)
    }

    pub fn is_store_available(&self) -> bool {
        self.storage.is_some()
    }

    pub fn templates(&self) -> &PromptTemplateStore {
        &self.templates
    }

    /// Read template, rules and feedback (in that order) and build the payload.
    pub async fn assemble_payload(&self, text: &str) -> Result<String, TranslatorError> {
        let storage = self.storage()?;
        let template = self.templates.load().await?;
        let sources = storage.prompt_sources().await?;
        debug!(
            rules = sources.rules.len(),
            feedbacks = sources.feedbacks.len(),
            "prompt sources loaded"
        );
        Ok(assemble(&template, text, &sources.rules, &sources.feedbacks))
    }

    pub async fn translate(&self, text: &str) -> Result<TranslationResult, TranslatorError> {
        let payload = self.assemble_payload(text).await?;
        let translation = self.client.complete(&payload).await?;
        info!(
            model = %self.client.model(),
            input_chars = text.chars().count(),
            payload_chars = payload.chars().count(),
            "translation completed"
        );
        Ok(TranslationResult { translation })
    }
}
