//! Tokenizer: normalizes raw text into candidate terms.
//!
//! Rules:
//! - lowercase
//! - every char that is not a letter, digit, `-`, `#` or `+` separates terms
//! - leading/trailing `-`, `#`, `+` are trimmed from each piece
//! - empty pieces are dropped
//!
//! Length and stopword filtering happen downstream in the frequency index.
//! Tokenization is total: degenerate input yields an empty sequence.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized lexical unit. Only the tokenizer constructs terms from raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    /// Normalizes a single word. Returns `None` unless `raw` yields exactly one term.
    #[cfg(test)]
    pub fn parse(raw: &str) -> Option<Term> {
        let mut terms = tokenize(raw);
        if terms.len() == 1 {
            terms.pop()
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A term plus the char range it came from in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermSpan {
    pub term: Term,
    /// Char offset of the first kept char.
    pub start: usize,
    /// Char offset one past the last kept char.
    pub end: usize,
}

/// Tokenizes `text` into terms in first-appearance order, duplicates retained.
pub fn tokenize(text: &str) -> Vec<Term> {
    tokenize_spans(text).into_iter().map(|s| s.term).collect()
}

/// Same as [`tokenize`] but keeps the source span of every term.
pub fn tokenize_spans(text: &str) -> Vec<TermSpan> {
    let mut spans = Vec::new();
    let mut piece: Vec<char> = Vec::new();
    let mut piece_start = 0usize;

    for (pos, c) in text.chars().enumerate() {
        if is_term_char(c) {
            if piece.is_empty() {
                piece_start = pos;
            }
            piece.push(c);
        } else if !piece.is_empty() {
            push_piece(&mut spans, &piece, piece_start);
            piece.clear();
        }
    }
    if !piece.is_empty() {
        push_piece(&mut spans, &piece, piece_start);
    }

    spans
}

fn push_piece(spans: &mut Vec<TermSpan>, piece: &[char], start: usize) {
    let lead = piece.iter().take_while(|c| is_edge_char(**c)).count();
    if lead == piece.len() {
        return;
    }
    let trail = piece.iter().rev().take_while(|c| is_edge_char(**c)).count();
    let kept = &piece[lead..piece.len() - trail];

    spans.push(TermSpan {
        term: Term(kept.iter().flat_map(|c| c.to_lowercase()).collect()),
        start: start + lead,
        end: start + piece.len() - trail,
    });
}

fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || is_edge_char(c)
}

fn is_edge_char(c: char) -> bool {
    matches!(c, '-' | '#' | '+')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.0).collect()
    }

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            words("Led the Billing-Platform, team!"),
            vec!["led", "the", "billing-platform", "team"]
        );
    }

    #[test]
    fn test_trims_edge_symbols_but_keeps_inner_ones() {
        assert_eq!(words("--rust-- #tag c++ node-js"), vec!["rust", "tag", "c", "node-js"]);
    }

    #[test]
    fn test_duplicates_retained_in_order() {
        assert_eq!(words("rust go rust"), vec!["rust", "go", "rust"]);
    }

    #[test]
    fn test_empty_and_degenerate_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("--- ### +++ ... !!!").is_empty());
        assert!(tokenize("\u{0}\u{1}\u{7f}").is_empty());
    }

    #[test]
    fn test_never_yields_empty_tokens() {
        let inputs = ["a - b", "#", "+-+x+-+", "x,,y", "\r\n\r\n", "é-", "--ü--"];
        for input in inputs {
            assert!(
                tokenize(input).iter().all(|t| !t.as_str().is_empty()),
                "empty token for {input:?}"
            );
        }
    }

    #[test]
    fn test_unicode_letters_are_term_chars() {
        assert_eq!(words("Café Zürich"), vec!["café", "zürich"]);
    }

    #[test]
    fn test_spans_point_at_source_chars() {
        let text = "Hi, (Rust)-lang ++go";
        let spans = tokenize_spans(text);
        let chars: Vec<char> = text.chars().collect();
        for span in &spans {
            let source: String = chars[span.start..span.end].iter().collect();
            assert_eq!(source.to_lowercase(), span.term.as_str());
        }
        assert_eq!(spans[1].term.as_str(), "rust");
        assert_eq!(spans[2].term.as_str(), "lang");
        assert_eq!(spans[3].term.as_str(), "go");
    }

    #[test]
    fn test_term_parse_single_word_only() {
        assert_eq!(Term::parse("Python").map(|t| t.0), Some("python".to_string()));
        assert!(Term::parse("two words").is_none());
        assert!(Term::parse("...").is_none());
    }
}
