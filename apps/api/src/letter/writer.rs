//! Letter writers: pluggable backends that turn a resume/job pair into letter text.
//!
//! Default: `TemplateWriter` (the deterministic composer, no I/O).
//! Optional: `LlmWriter` (language-generation collaborator via `llm_client`).
//!
//! `AppState` holds one `Arc<dyn LetterWriter>` per available backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::letter::composer::{Letter, LetterComposer};
use crate::letter::prompts::{build_letter_prompt, LETTER_SYSTEM};
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriterBackend {
    #[default]
    Template,
    Llm,
}

/// Letter text plus whatever structured detail the backend can report.
#[derive(Debug, Clone, Serialize)]
pub struct LetterDraft {
    pub text: String,
    pub backend: WriterBackend,
    /// Only the template backend knows which heuristics and terms it used.
    pub details: Option<Letter>,
}

#[async_trait]
pub trait LetterWriter: Send + Sync {
    fn backend(&self) -> WriterBackend;

    async fn write(&self, resume_text: &str, job_text: &str) -> Result<LetterDraft, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateWriter
// ────────────────────────────────────────────────────────────────────────────

pub struct TemplateWriter(pub LetterComposer);

#[async_trait]
impl LetterWriter for TemplateWriter {
    fn backend(&self) -> WriterBackend {
        WriterBackend::Template
    }

    async fn write(&self, resume_text: &str, job_text: &str) -> Result<LetterDraft, AppError> {
        let letter = self.0.compose(resume_text, job_text);
        Ok(LetterDraft {
            text: letter.text(),
            backend: WriterBackend::Template,
            details: Some(letter),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmWriter
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmWriter(pub LlmClient);

#[async_trait]
impl LetterWriter for LlmWriter {
    fn backend(&self) -> WriterBackend {
        WriterBackend::Llm
    }

    async fn write(&self, resume_text: &str, job_text: &str) -> Result<LetterDraft, AppError> {
        if resume_text.trim().is_empty() && job_text.trim().is_empty() {
            return Ok(LetterDraft {
                text: String::new(),
                backend: WriterBackend::Llm,
                details: None,
            });
        }

        let prompt = build_letter_prompt(resume_text, job_text);
        let text = self
            .0
            .call_text(&prompt, LETTER_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Letter generation failed: {e}")))?;
        info!(chars = text.len(), "LLM letter generated");

        Ok(LetterDraft {
            text,
            backend: WriterBackend::Llm,
            details: None,
        })
    }
}
