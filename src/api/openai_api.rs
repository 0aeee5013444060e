use crate::config::Config;
use crate::error::TranslatorError;
use crate::types::openai::{ChatCompletionRequest, ChatCompletionResponse, OpenAiErrorEnvelope};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// One instance is built at startup; the inner `reqwest::Client` pools
/// connections and is safe to share across concurrent requests.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(cfg: &Config) -> Result<Self, TranslatorError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tlumacz/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(cfg.request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: completions_url(&cfg.openai_base_url)?,
            api_key: cfg.openai_api_key.clone(),
            model: cfg.openai_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `payload` as a single user message and return the first choice's
    /// text unchanged. Exactly one round trip, no retry.
    pub async fn complete(&self, payload: &str) -> Result<String, TranslatorError> {
        let body = ChatCompletionRequest::single_user_text(&self.model, payload);
        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let (message, kind) = match serde_json::from_slice::<OpenAiErrorEnvelope>(&bytes) {
                Ok(envelope) => (envelope.error.message, envelope.error.kind),
                Err(_) => (String::from_utf8_lossy(&bytes).into_owned(), None),
            };
            error!(
                status = %status,
                kind = kind.as_deref().unwrap_or("<none>"),
                "completion API returned an error"
            );
            return Err(TranslatorError::UpstreamApi { status, message });
        }

        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| TranslatorError::MalformedCompletion(e.to_string()))?;
        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(TranslatorError::MalformedCompletion(
                "response contained no choices".to_string(),
            ));
        };
        let Some(content) = choice.message.content else {
            return Err(TranslatorError::MalformedCompletion(
                "first choice has no message content".to_string(),
            ));
        };
        debug!(model = %self.model, chars = content.chars().count(), "completion received");
        Ok(content)
    }
}

/// `{base}/chat/completions`, tolerating a base without a trailing slash.
fn completions_url(base: &Url) -> Result<Url, TranslatorError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("chat/completions")?)
}
