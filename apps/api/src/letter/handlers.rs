use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::letter::composer::Letter;
use crate::letter::writer::{LetterWriter, WriterBackend};
use crate::matching::highlight::{highlight_spans, HighlightSpan};
use crate::matching::relevance::KeywordAnalysis;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LetterInput {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_text: String,
}

#[derive(Serialize)]
pub struct KeywordsResponse {
    #[serde(flatten)]
    pub analysis: KeywordAnalysis,
    pub resume_spans: Vec<HighlightSpan>,
    pub job_spans: Vec<HighlightSpan>,
}

/// POST /api/v1/letters/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(req): Json<LetterInput>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let analysis = state.matcher.analyze(&req.resume_text, &req.job_text);
    let resume_spans = highlight_spans(&req.resume_text, &analysis.highlight.terms);
    let job_spans = highlight_spans(&req.job_text, &analysis.highlight.terms);
    tracing::debug!(
        highlights = analysis.highlight.terms.len(),
        coverage = analysis.coverage.coverage,
        "keyword analysis"
    );
    Ok(Json(KeywordsResponse {
        analysis,
        resume_spans,
        job_spans,
    }))
}

#[derive(Deserialize)]
pub struct LetterRequest {
    #[serde(flatten)]
    pub input: LetterInput,
    #[serde(default)]
    pub backend: WriterBackend,
}

#[derive(Serialize)]
pub struct LetterResponse {
    pub text: String,
    pub backend: WriterBackend,
    pub details: Option<Letter>,
    /// Inline status when the backend failed; `text` is then empty.
    pub status: Option<String>,
}

/// POST /api/v1/letters
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    Json(req): Json<LetterRequest>,
) -> Result<Json<LetterResponse>, AppError> {
    let writer: Arc<dyn LetterWriter> = match req.backend {
        WriterBackend::Template => state.template_writer.clone(),
        WriterBackend::Llm => state.llm_writer.clone().ok_or_else(|| {
            AppError::Validation("LLM backend is not configured (set ANTHROPIC_API_KEY)".into())
        })?,
    };

    let response = match writer.write(&req.input.resume_text, &req.input.job_text).await {
        Ok(draft) => LetterResponse {
            text: draft.text,
            backend: draft.backend,
            details: draft.details,
            status: None,
        },
        Err(e) => {
            tracing::warn!(backend = ?writer.backend(), "letter generation failed: {e}");
            LetterResponse {
                text: String::new(),
                backend: writer.backend(),
                details: None,
                status: Some(format!("Letter generation failed: {e}")),
            }
        }
    };

    Ok(Json(response))
}
