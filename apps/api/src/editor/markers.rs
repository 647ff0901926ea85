//! Marker Lifecycle: sentinel-wrapped placeholder values dropped into a document.

use serde::{Deserialize, Serialize};

use crate::editor::document::{CaretTarget, Document, Segment};

pub const DEFAULT_OPEN: &str = "}}";
pub const DEFAULT_CLOSE: &str = "{{";

/// The open/close sentinel pair. Configured once per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
        }
    }
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, String> {
        let open = open.into();
        let close = close.into();
        if open.is_empty() || close.is_empty() {
            return Err("marker sentinels must not be empty".into());
        }
        if open == close {
            return Err("open and close sentinels must differ".into());
        }
        if open.chars().chain(close.chars()).any(char::is_whitespace) {
            return Err("marker sentinels must not contain whitespace".into());
        }
        Ok(Self { open, close })
    }

    /// Removes every occurrence of the open sentinel, then every close sentinel.
    pub fn strip(&self, text: &str) -> String {
        text.replace(&self.open, "").replace(&self.close, "")
    }

    /// How many sentinel strings already occur in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        text.matches(self.open.as_str()).count() + text.matches(self.close.as_str()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    value: String,
    #[serde(skip)]
    delimiters: Delimiters,
}

impl Marker {
    pub fn new(value: impl Into<String>, delimiters: &Delimiters) -> Self {
        Self {
            value: value.into(),
            delimiters: delimiters.clone(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `open + value + close`
    pub fn rendered(&self) -> String {
        format!("{}{}{}", self.delimiters.open, self.value, self.delimiters.close)
    }

    pub fn char_len(&self) -> usize {
        self.delimiters.open.chars().count()
            + self.value.chars().count()
            + self.delimiters.close.chars().count()
    }

    /// Local char range of the value inside the rendered marker.
    pub fn value_range(&self) -> (usize, usize) {
        let start = self.delimiters.open.chars().count();
        (start, start + self.value.chars().count())
    }

    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            delimiters: self.delimiters.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub document: Document,
    /// Caret offset right after the new marker.
    pub caret: usize,
    pub marker_offset: usize,
}

/// Drops a marker for `value` at the caret target, or at the end when there is none.
///
/// A target strictly inside an existing marker is moved to that marker's end so
/// markers never nest.
pub fn insert_marker(
    doc: &Document,
    target: Option<CaretTarget>,
    value: &str,
    delimiters: &Delimiters,
) -> Insertion {
    let offset = match target {
        Some(target) => doc.snap_outside_marker(target.offset),
        None => doc.len_chars(),
    };
    let marker = Marker::new(value, delimiters);
    let len = marker.char_len();
    Insertion {
        document: doc.insert(offset, Segment::Marker(marker)),
        caret: offset + len,
        marker_offset: offset,
    }
}
