//! Term Frequency Index: term → count, built from one document's token sequence.
//!
//! Each entry also remembers the position of the term's first occurrence so that
//! ranking can break count ties in first-seen order.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::matching::tokenizer::{tokenize, Term};

/// Terms shorter than this (in chars) never enter the index.
pub const MIN_TERM_CHARS: usize = 2;

/// Built-in English stopword pack.
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "to", "for", "in", "on", "with", "as", "by", "is", "are",
    "be", "that", "this", "we", "you", "your", "our", "at", "from", "will", "have", "has", "it",
    "its",
];

// ────────────────────────────────────────────────────────────────────────────
// Stopwords
// ────────────────────────────────────────────────────────────────────────────

/// A swappable stopword pack. Entries are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        )
    }

    /// Parses a newline-separated pack. Blank lines and `#` comments are skipped.
    pub fn parse(pack: &str) -> Self {
        Self::from_words(
            pack.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Frequency table
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermStat {
    pub count: u32,
    /// Index of the first occurrence in the source token sequence.
    pub first_seen: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequencyTable {
    stats: HashMap<Term, TermStat>,
}

impl TermFrequencyTable {
    /// Counts every token that is at least [`MIN_TERM_CHARS`] long and not a stopword.
    pub fn build(tokens: &[Term], stopwords: &Stopwords) -> Self {
        let mut stats: HashMap<Term, TermStat> = HashMap::new();

        for (position, token) in tokens.iter().enumerate() {
            if token.char_len() < MIN_TERM_CHARS || stopwords.contains(token.as_str()) {
                continue;
            }
            stats
                .entry(token.clone())
                .and_modify(|stat| stat.count += 1)
                .or_insert(TermStat {
                    count: 1,
                    first_seen: position,
                });
        }

        Self { stats }
    }

    pub fn from_text(text: &str, stopwords: &Stopwords) -> Self {
        Self::build(&tokenize(text), stopwords)
    }

    pub fn get(&self, term: &str) -> Option<TermStat> {
        self.stats.get(term).copied()
    }

    pub fn count(&self, term: &str) -> u32 {
        self.get(term).map(|s| s.count).unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.stats.contains_key(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &TermStat)> {
        self.stats.iter()
    }
}
