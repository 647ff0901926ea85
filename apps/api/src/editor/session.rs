use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::editor::caret::{resolve_target, CaretIndicator, CaretOverlay, Point};
use crate::editor::document::{CaretTarget, Document, PlacedMarker};
use crate::editor::export::{export, ExportKind};
use crate::editor::fields::{FieldEntry, FieldSet};
use crate::editor::markers::{insert_marker, Delimiters};
use crate::layout::LayoutSpec;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("field {0} does not exist")]
    UnknownField(usize),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Per-deployment editor settings, taken from config.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub field_count: usize,
    pub field_max_chars: usize,
    pub delimiters: Delimiters,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            field_count: 10,
            field_max_chars: 20,
            delimiters: Delimiters::default(),
        }
    }
}

/// A direct text edit from the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    Insert { offset: usize, text: String },
    Delete { start: usize, end: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct DropOutcome {
    /// False when the point fell outside the region and the marker went to the end.
    pub resolved: bool,
    pub marker_offset: usize,
    pub caret: usize,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub text: String,
    pub plain_text: String,
    pub len: usize,
    pub markers: Vec<PlacedMarker>,
    pub fields: Vec<FieldEntry>,
    pub field_max_chars: usize,
    pub caret: Option<usize>,
    pub indicator: Option<CaretIndicator>,
    pub preview: String,
    pub layout: LayoutSpec,
    pub sentinel_collisions: usize,
}

/// One user's editing state. Owned by a single `Mutex` in the store, so every
/// method here runs without interleaving.
#[derive(Debug)]
pub struct EditorSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    document: Document,
    fields: FieldSet,
    settings: EditorSettings,
    layout: LayoutSpec,
    overlay: CaretOverlay,
    caret: Option<usize>,
}

impl EditorSession {
    pub fn open(text: &str, settings: EditorSettings) -> Self {
        let id = Uuid::new_v4();
        let document = Document::load(text);
        let sentinel_collisions = document.count_sentinels(&settings.delimiters);
        if sentinel_collisions > 0 {
            tracing::warn!(
                session_id = %id,
                sentinel_collisions,
                "loaded text already contains marker sentinels; clean export will strip them too"
            );
        }
        Self {
            id,
            created_at: Utc::now(),
            document,
            fields: FieldSet::new(settings.field_count),
            settings,
            layout: LayoutSpec::default(),
            overlay: CaretOverlay::default(),
            caret: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Sentinel strings sitting in the text outside marker boundaries. Clean
    /// export strips these along with the real markers.
    pub fn sentinel_collisions(&self) -> usize {
        self.document.count_sentinels(&self.settings.delimiters)
    }

    /// Where a drop at `point` would insert: the resolved offset, moved past any
    /// marker it lands inside. Hover and drop both go through here.
    fn drop_target(&self, point: Point) -> Option<CaretTarget> {
        let layout = self.layout.layout(&self.document.to_marked_text());
        resolve_target(&self.document, &layout, point)
            .map(|target| self.document.locate(self.document.snap_outside_marker(target.offset)))
    }

    /// Client coordinates of the caret before `offset` in the current layout.
    pub fn caret_point(&self, offset: usize) -> Option<Point> {
        self.layout
            .layout(&self.document.to_marked_text())
            .caret_position(offset)
    }

    /// Moves the transient indicator to where a drop would land. Never touches the text.
    pub fn hover(&mut self, point: Point) -> Option<CaretIndicator> {
        match self.drop_target(point) {
            Some(target) => Some(self.overlay.show(target)),
            None => {
                self.overlay.clear();
                None
            }
        }
    }

    pub fn cancel_drag(&mut self) {
        self.overlay.clear();
    }

    /// Copies the field's current value into a new marker at the pointer.
    pub fn drop_field(&mut self, point: Point, field: usize) -> Result<DropOutcome, SessionError> {
        let value = self
            .fields
            .get(field)
            .ok_or(SessionError::UnknownField(field))?
            .to_string();

        let target = self.drop_target(point);
        let insertion = insert_marker(&self.document, target, &value, &self.settings.delimiters);

        self.overlay.clear();
        self.document = insertion.document;
        self.caret = Some(insertion.caret);

        tracing::debug!(
            session_id = %self.id,
            field,
            marker_offset = insertion.marker_offset,
            resolved = target.is_some(),
            "marker dropped"
        );

        Ok(DropOutcome {
            resolved: target.is_some(),
            marker_offset: insertion.marker_offset,
            caret: insertion.caret,
            value,
        })
    }

    pub fn edit(&mut self, edit: Edit) {
        let collisions_before = self.sentinel_collisions();
        let (document, caret) = match edit {
            Edit::Insert { offset, text } => {
                let offset = offset.min(self.document.len_chars());
                let document = self.document.insert_text(offset, &text);
                let grown = document.len_chars() - self.document.len_chars();
                (document, offset + grown)
            }
            Edit::Delete { start, end } => {
                let caret = start.min(end).min(self.document.len_chars());
                (self.document.delete_range(start, end), caret)
            }
        };
        self.document = document;
        self.caret = Some(caret);
        self.overlay.clear();

        let collisions = self.sentinel_collisions();
        if collisions > collisions_before {
            tracing::warn!(
                session_id = %self.id,
                sentinel_collisions = collisions,
                "edit introduced marker sentinel text; clean export will strip it"
            );
        }
    }

    pub fn set_field(&mut self, index: usize, value: &str) -> Result<(), SessionError> {
        self.fields = self
            .fields
            .with_value(index, value)
            .ok_or(SessionError::UnknownField(index))?;
        Ok(())
    }

    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        self.fields = self
            .fields
            .with_moved(from, to)
            .ok_or(SessionError::UnknownField(from.max(to)))?;
        Ok(())
    }

    pub fn set_layout(&mut self, spec: LayoutSpec) -> Result<(), SessionError> {
        spec.validate().map_err(SessionError::InvalidLayout)?;
        self.layout = spec;
        self.overlay.clear();
        Ok(())
    }

    pub fn strip_markers(&mut self) -> usize {
        let removed = self.document.markers().len();
        self.document = self.document.strip_markers();
        self.caret = self.caret.map(|c| c.min(self.document.len_chars()));
        removed
    }

    pub fn export(&self, kind: ExportKind) -> String {
        export(&self.document, kind, &self.settings.delimiters)
    }

    /// Marked text between two logical offsets, in either order.
    pub fn read_range(&self, start: usize, end: usize) -> String {
        self.document.read_range(start, end)
    }

    pub fn preview(&self) -> String {
        self.overlay.render(&self.document)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            text: self.document.to_marked_text(),
            plain_text: self.document.to_plain_text(),
            len: self.document.len_chars(),
            markers: self.document.markers(),
            fields: self.fields.entries(),
            field_max_chars: self.settings.field_max_chars,
            caret: self.caret,
            indicator: self.overlay.current(),
            preview: self.preview(),
            layout: self.layout.clone(),
            sentinel_collisions: self.sentinel_collisions(),
        }
    }
}
