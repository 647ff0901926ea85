use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Extracted text, or empty text plus an inline status when the source failed.
#[derive(Debug, Serialize)]
pub struct SourceResponse {
    pub text: String,
    pub status: Option<String>,
}

impl SourceResponse {
    fn ok(text: String) -> Self {
        let status = text
            .trim()
            .is_empty()
            .then(|| "No readable text found".to_string());
        Self { text, status }
    }

    fn failed(status: String) -> Self {
        Self {
            text: String::new(),
            status: Some(status),
        }
    }
}

/// POST /api/v1/sources/resume  (multipart, field `file`)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SourceResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        info!(%filename, size = bytes.len(), "resume upload received");
        let response = match state
            .extractor
            .extract(&filename, content_type.as_deref(), bytes)
            .await
        {
            Ok(text) => SourceResponse::ok(text),
            Err(e) => {
                warn!(%filename, "resume extraction failed: {e}");
                SourceResponse::failed(format!("Could not read {filename}: {e}"))
            }
        };
        return Ok(Json(response));
    }

    Err(AppError::Validation("Missing multipart field 'file'".into()))
}

#[derive(Deserialize)]
pub struct JobFetchRequest {
    pub url: String,
}

/// POST /api/v1/sources/job
pub async fn handle_fetch_job(
    State(state): State<AppState>,
    Json(req): Json<JobFetchRequest>,
) -> Result<Json<SourceResponse>, AppError> {
    let response = match state.job_fetcher.fetch(&req.url).await {
        Ok(text) => SourceResponse::ok(text),
        Err(e) => {
            warn!(url = %req.url, "job posting fetch failed: {e}");
            SourceResponse::failed(format!("Could not fetch job posting: {e}"))
        }
    };
    Ok(Json(response))
}
