//! Database module: rule/feedback records and the SQL that backs them.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and admin input bodies
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pooled storage used by the translate path and the admin surface

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Feedback, NewFeedback, NewRule, Rule};
pub use schema::SQLITE_INIT;
pub use sqlite::{PromptSources, SqlitePool, TranslatorStorage};
