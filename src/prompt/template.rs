use crate::config::PromptFallback;
use crate::error::TranslatorError;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Distinguishes the temporary files of overlapping saves.
static SAVE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Used when the template file is unreadable and the fallback is `default`.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"
Jesteś ekspertem w dziedzinie tłumaczeń z języka niemieckiego na język polski.

Poniżej opis po niemiecku dotyczący stanu pacjenta (starszej osoby z Niemiec), dla którego szukamy opiekunki.

Przetłumacz ten opis na język Polski. Opis będzie prezentowany do potencjalnej opiekunki, dlatego napisz go tak jakbyś prezentował tą ofertę pracy do niej.

Powinieneś śledzić:
- Nie pisz o zleceniu w osobie trzeciej np.
- "Oferta mówi o" albo "Zlecenie jest". Zadbaj o zgodność logiczną, pisz tylko to co wiesz i jest prawdą w źródle.
-Opis ma mieć charakter ciągły, a nie punktów:

"#;

/// The system prompt, stored as a whole file at a fixed path.
#[derive(Debug, Clone)]
pub struct PromptTemplateStore {
    path: PathBuf,
    fallback: PromptFallback,
}

impl PromptTemplateStore {
    pub fn new(path: impl Into<PathBuf>, fallback: PromptFallback) -> Self {
        Self {
            path: path.into(),
            fallback,
        }
    }

    /// Raw file content, for the admin surface.
    pub async fn read(&self) -> Result<String, TranslatorError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => TranslatorError::TemplateMissing {
                    path: self.path.clone(),
                },
                _ => TranslatorError::TemplateRead {
                    path: self.path.clone(),
                    source,
                },
            })
    }

    /// Template text for a translation request, with the configured fallback
    /// applied when the file cannot be read.
    pub async fn load(&self) -> Result<String, TranslatorError> {
        let source = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => return Ok(text),
            Err(e) => e,
        };

        match self.fallback {
            PromptFallback::Fail => Err(TranslatorError::TemplateRead {
                path: self.path.clone(),
                source,
            }),
            PromptFallback::Default => {
                warn!(path = %self.path.display(), error = %source, "prompt template unreadable; using built-in default");
                Ok(DEFAULT_SYSTEM_PROMPT.to_string())
            }
            PromptFallback::Diagnostic => {
                warn!(path = %self.path.display(), error = %source, "prompt template unreadable; embedding diagnostic");
                Ok(diagnostic(&self.path, &source))
            }
        }
    }

    /// Replace the whole template. Each save writes its own sibling file and
    /// renames it over the target, so readers never observe a partial write
    /// and concurrent saves resolve to the last rename.
    pub async fn save(&self, text: &str) -> Result<(), TranslatorError> {
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            SAVE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let tmp = PathBuf::from(tmp);

        let write_err = |source: std::io::Error| TranslatorError::TemplateWrite {
            path: self.path.clone(),
            source,
        };
        let written = match tokio::fs::write(&tmp, text).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }

        info!(path = %self.path.display(), bytes = text.len(), "prompt template replaced");
        Ok(())
    }
}

/// Text used in place of the template by the `diagnostic` fallback:
/// `The file {path} does not exist.` when missing, otherwise
/// `[Errno {code}] {reason}: '{path}'` for OS errors.
fn diagnostic(path: &Path, err: &std::io::Error) -> String {
    if err.kind() == ErrorKind::NotFound {
        return format!("The file {} does not exist.", path.display());
    }
    let text = err.to_string();
    match err.raw_os_error() {
        Some(code) => {
            let reason = text
                .strip_suffix(&format!(" (os error {code})"))
                .unwrap_or(&text);
            format!("[Errno {code}] {reason}: '{}'", path.display())
        }
        None => text,
    }
}
