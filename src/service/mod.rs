pub mod translation;

pub use translation::TranslationService;
