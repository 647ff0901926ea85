//! Keyword highlighting: locates highlight terms inside a source text.
//!
//! Uses the tokenizer's span mode so a highlighted range is exactly what
//! the scorer counted.

use std::collections::HashSet;

use serde::Serialize;

use crate::matching::tokenizer::{tokenize_spans, Term};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub term: Term,
    /// Char offsets into the source text, end exclusive.
    pub start: usize,
    pub end: usize,
}

/// Every occurrence of any of `terms` in `text`, in source order.
pub fn highlight_spans(text: &str, terms: &[Term]) -> Vec<HighlightSpan> {
    if terms.is_empty() {
        return vec![];
    }
    let wanted: HashSet<&Term> = terms.iter().collect();
    tokenize_spans(text)
        .into_iter()
        .filter(|span| wanted.contains(&span.term))
        .map(|span| HighlightSpan {
            term: span.term,
            start: span.start,
            end: span.end,
        })
        .collect()
}
