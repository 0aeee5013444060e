//! Prompt composition for translation requests.
//!
//! - `template.rs`: file-backed system prompt with configurable read fallback
//! - `assembler.rs`: deterministic payload construction from template, input, rules and feedback

pub mod assembler;
pub mod template;

pub use assembler::{FEEDBACKS_HEADER, RULES_HEADER, assemble};
pub use template::{DEFAULT_SYSTEM_PROMPT, PromptTemplateStore};
