use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::TranslatorError;

const CONFIG_FILE: &str = "config.toml";

/// Environment variables picked up on top of `config.toml`.
const ENV_KEYS: &[&str] = &[
    "DATABASE_URL",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_MODEL",
    "PROMPT_PATH",
    "PROMPT_FALLBACK",
    "LISTEN_ADDR",
    "ADMIN_ADDR",
    "REQUEST_TIMEOUT_SECS",
    "MAX_BODY_BYTES",
    "LOGLEVEL",
];

/// What to do when the prompt template file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptFallback {
    /// Fail the translation request.
    #[default]
    Fail,
    /// Use the built-in default system prompt.
    Default,
    /// Put the read error text in place of the template.
    Diagnostic,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_base_url: Url,
    pub openai_model: String,
    pub prompt_path: PathBuf,
    pub prompt_fallback: PromptFallback,
    pub listen_addr: String,
    pub admin_addr: String,
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:tlumacz.sqlite".to_string(),
            openai_api_key: String::new(),
            openai_base_url: Url::parse("https://api.openai.com/v1/")
                .expect("default OpenAI base url is valid"),
            openai_model: "gpt-4o".to_string(),
            prompt_path: PathBuf::from("system_prompt.txt"),
            prompt_fallback: PromptFallback::Fail,
            listen_addr: "0.0.0.0:8000".to_string(),
            admin_addr: "0.0.0.0:8501".to_string(),
            request_timeout_secs: 120,
            max_body_bytes: 1024 * 1024,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Layered sources: built-in defaults, then `config.toml`, then the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(ENV_KEYS))
    }

    pub fn load() -> Result<Self, TranslatorError> {
        Ok(Self::figment().extract()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
