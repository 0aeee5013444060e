pub mod openai_api;

pub use openai_api::OpenAiClient;
