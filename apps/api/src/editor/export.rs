//! Export Pipeline: raw (markers intact) and clean (sentinels stripped) text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::editor::document::{normalize_newlines, Document};
use crate::editor::markers::Delimiters;

/// Two or more line breaks separated only by blank space.
static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid blank-run regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Raw,
    Clean,
}

impl ExportKind {
    pub fn filename(self) -> &'static str {
        match self {
            ExportKind::Raw => "with_markers.txt",
            ExportKind::Clean => "final.txt",
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(ExportKind::Raw),
            "clean" => Ok(ExportKind::Clean),
            other => Err(format!("unknown export kind '{other}' (expected raw or clean)")),
        }
    }
}

/// Canonical `\n` line breaks, with runs of blank lines collapsed to one.
pub fn normalize_line_breaks(text: &str) -> String {
    BLANK_RUN
        .replace_all(&normalize_newlines(text), "\n\n")
        .into_owned()
}

pub fn export_raw(doc: &Document) -> String {
    normalize_line_breaks(&doc.to_marked_text())
}

pub fn export_clean(doc: &Document, delimiters: &Delimiters) -> String {
    delimiters.strip(&export_raw(doc))
}

pub fn export(doc: &Document, kind: ExportKind, delimiters: &Delimiters) -> String {
    match kind {
        ExportKind::Raw => export_raw(doc),
        ExportKind::Clean => export_clean(doc, delimiters),
    }
}
