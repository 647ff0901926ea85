use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::editor::session::EditorSettings;
use crate::editor::store::SessionStore;
use crate::letter::composer::LetterComposer;
use crate::letter::writer::{LetterWriter, LlmWriter, TemplateWriter};
use crate::llm_client::{self, LlmClient};
use crate::matching::KeywordMatcher;
use crate::sources::{JobPostingFetcher, TextExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<KeywordMatcher>,
    /// Deterministic composer. Always available.
    pub template_writer: Arc<dyn LetterWriter>,
    /// Present only when `ANTHROPIC_API_KEY` is set.
    pub llm_writer: Option<Arc<dyn LetterWriter>>,
    pub extractor: Arc<TextExtractor>,
    pub job_fetcher: JobPostingFetcher,
    pub editor_settings: EditorSettings,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn build(config: &Config) -> Result<Self> {
        let stopwords = config.load_stopwords()?;
        if stopwords.is_empty() {
            warn!("Stopword pack is empty; every term will be ranked");
        }
        info!(stopwords = stopwords.len(), "Stopword pack loaded");
        let matcher = Arc::new(KeywordMatcher::new(stopwords));

        let template_writer: Arc<dyn LetterWriter> =
            Arc::new(TemplateWriter(LetterComposer::new(matcher.clone())));

        let llm_writer: Option<Arc<dyn LetterWriter>> = match &config.anthropic_api_key {
            Some(key) => {
                let client = LlmClient::new(key.clone()).context("Failed to build LLM client")?;
                info!("LLM letter backend enabled (model: {})", llm_client::MODEL);
                Some(Arc::new(LlmWriter(client)))
            }
            None => {
                info!("ANTHROPIC_API_KEY not set; LLM letter backend disabled");
                None
            }
        };

        let job_fetcher = JobPostingFetcher::new(Duration::from_secs(config.fetch_timeout_secs))
            .context("Failed to build job posting HTTP client")?;

        Ok(AppState {
            matcher,
            template_writer,
            llm_writer,
            extractor: Arc::new(TextExtractor::new()),
            job_fetcher,
            editor_settings: config.editor_settings(),
            sessions: SessionStore::new(),
        })
    }
}
