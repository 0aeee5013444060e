pub mod openai;
pub mod translate;

pub use translate::{HealthResponse, MessageResponse, PromptBody, TranslationRequest, TranslationResult};
