use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::caret::{CaretIndicator, Point};
use crate::editor::export::ExportKind;
use crate::editor::fields::truncate_chars;
use crate::editor::session::{DropOutcome, Edit, EditorSession, SessionView};
use crate::editor::store::SharedSession;
use crate::errors::AppError;
use crate::layout::LayoutSpec;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OpenDocumentRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct SetFieldRequest {
    pub value: String,
}

#[derive(Deserialize)]
pub struct MoveFieldRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Deserialize)]
pub struct DropRequest {
    pub x: f32,
    pub y: f32,
    pub field: usize,
}

#[derive(Serialize)]
pub struct HoverResponse {
    pub indicator: Option<CaretIndicator>,
    /// Where to draw the indicator, in the same coordinates as the request.
    pub position: Option<Point>,
    pub preview: String,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub start: usize,
    pub end: usize,
}

#[derive(Serialize)]
pub struct RangeResponse {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Serialize)]
pub struct DropResponse {
    #[serde(flatten)]
    pub outcome: DropOutcome,
    pub document: SessionView,
}

#[derive(Serialize)]
pub struct StripResponse {
    pub removed: usize,
    pub document: SessionView,
}

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))
}

/// POST /api/v1/documents
pub async fn handle_open_document(
    State(state): State<AppState>,
    Json(req): Json<OpenDocumentRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = EditorSession::open(&req.text, state.editor_settings.clone());
    let view = session.view();
    state.sessions.insert(session).await;
    tracing::info!(session_id = %view.id, len = view.len, "document opened");
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let view = session.lock().await.view();
    Ok(Json(view))
}

/// DELETE /api/v1/documents/:id
pub async fn handle_close_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Document {id} not found")));
    }
    tracing::info!(session_id = %id, "document closed");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/documents/:id/fields/:index
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let value = truncate_chars(&req.value, session.settings().field_max_chars);
    session.set_field(index, &value)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/documents/:id/fields/move
pub async fn handle_move_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveFieldRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.move_field(req.from, req.to)?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/documents/:id/layout
pub async fn handle_set_layout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(spec): Json<LayoutSpec>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.set_layout(spec)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/documents/:id/hover
pub async fn handle_hover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(point): Json<Point>,
) -> Result<Json<HoverResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let indicator = session.hover(point);
    let position = indicator.and_then(|ind| session.caret_point(ind.offset));
    Ok(Json(HoverResponse {
        indicator,
        position,
        preview: session.preview(),
    }))
}

/// GET /api/v1/documents/:id/range?start=&end=
pub async fn handle_read_range(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<RangeResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(RangeResponse {
        start: range.start,
        end: range.end,
        text: session.read_range(range.start, range.end),
    }))
}

/// POST /api/v1/documents/:id/drag/cancel
pub async fn handle_cancel_drag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.cancel_drag();
    Ok(Json(session.view()))
}

/// POST /api/v1/documents/:id/drop
pub async fn handle_drop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DropRequest>,
) -> Result<Json<DropResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let outcome = session.drop_field(Point { x: req.x, y: req.y }, req.field)?;
    Ok(Json(DropResponse {
        outcome,
        document: session.view(),
    }))
}

/// POST /api/v1/documents/:id/edits
pub async fn handle_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<Edit>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.edit(edit);
    Ok(Json(session.view()))
}

/// POST /api/v1/documents/:id/markers/strip
pub async fn handle_strip_markers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StripResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let removed = session.strip_markers();
    Ok(Json(StripResponse {
        removed,
        document: session.view(),
    }))
}

/// GET /api/v1/documents/:id/export/:kind
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let kind: ExportKind = kind.parse().map_err(AppError::Validation)?;
    let session = find_session(&state, id).await?;
    let text = session.lock().await.export(kind);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.filename()),
            ),
        ],
        text,
    )
        .into_response())
}
