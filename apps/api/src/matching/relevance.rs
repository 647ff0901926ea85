//! Relevance Matcher: ranked top-N terms per document and the prioritized
//! intersection between a job posting and a resume.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::Serialize;

use crate::matching::coverage::{coverage_report, CoverageReport};
use crate::matching::frequency::{Stopwords, TermFrequencyTable};
use crate::matching::tokenizer::Term;

/// Terms kept per document before intersecting.
pub const TOP_TERMS: usize = 20;
/// Maximum size of the intersection-derived highlight set.
pub const MAX_HIGHLIGHTS: usize = 8;
/// Size of the resume-only fallback when the documents share no terms.
pub const FALLBACK_HIGHLIGHTS: usize = 6;

/// Returns the `n` highest-count terms. Equal counts keep first-seen order.
pub fn top_terms(table: &TermFrequencyTable, n: usize) -> Vec<Term> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by_key(|(_, stat)| (Reverse(stat.count), stat.first_seen));
    entries
        .into_iter()
        .take(n)
        .map(|(term, _)| term.clone())
        .collect()
}

/// Walks `job_ranked` in rank order, keeping terms also present in `resume_ranked`,
/// and stops after `limit` matches.
pub fn prioritized_intersection(
    job_ranked: &[Term],
    resume_ranked: &[Term],
    limit: usize,
) -> Vec<Term> {
    let resume: HashSet<&Term> = resume_ranked.iter().collect();
    job_ranked
        .iter()
        .filter(|term| resume.contains(term))
        .take(limit)
        .cloned()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Highlight set
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightSource {
    /// Terms shared by the job posting and the resume, in job-rank order.
    Intersection,
    /// No shared terms: the resume's own top terms.
    ResumeFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSet {
    pub terms: Vec<Term>,
    pub source: HighlightSource,
}

impl HighlightSet {
    /// Comma-joined phrase used by the letter template, `None` when empty.
    pub fn phrase(&self) -> Option<String> {
        if self.terms.is_empty() {
            return None;
        }
        Some(
            self.terms
                .iter()
                .map(Term::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Full keyword view of a resume/job pair.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    pub resume_terms: Vec<Term>,
    pub job_terms: Vec<Term>,
    pub highlight: HighlightSet,
    pub coverage: CoverageReport,
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Bundles the stopword pack with the ranking limits. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    stopwords: Stopwords,
    pub top_n: usize,
    pub max_matches: usize,
    pub fallback_count: usize,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(Stopwords::english())
    }
}

impl KeywordMatcher {
    pub fn new(stopwords: Stopwords) -> Self {
        Self {
            stopwords,
            top_n: TOP_TERMS,
            max_matches: MAX_HIGHLIGHTS,
            fallback_count: FALLBACK_HIGHLIGHTS,
        }
    }

    pub fn table(&self, text: &str) -> TermFrequencyTable {
        TermFrequencyTable::from_text(text, &self.stopwords)
    }

    pub fn ranked_terms(&self, text: &str) -> Vec<Term> {
        top_terms(&self.table(text), self.top_n)
    }

    pub fn highlight(&self, resume: &str, job: &str) -> HighlightSet {
        self.highlight_from_ranked(&self.ranked_terms(resume), &self.ranked_terms(job))
    }

    pub fn analyze(&self, resume: &str, job: &str) -> KeywordAnalysis {
        let resume_table = self.table(resume);
        let job_table = self.table(job);
        let resume_terms = top_terms(&resume_table, self.top_n);
        let job_terms = top_terms(&job_table, self.top_n);
        let highlight = self.highlight_from_ranked(&resume_terms, &job_terms);
        let coverage = coverage_report(&resume_table, &job_table, self.top_n);

        KeywordAnalysis {
            resume_terms,
            job_terms,
            highlight,
            coverage,
        }
    }

    fn highlight_from_ranked(&self, resume_ranked: &[Term], job_ranked: &[Term]) -> HighlightSet {
        let shared = prioritized_intersection(job_ranked, resume_ranked, self.max_matches);
        if !shared.is_empty() {
            return HighlightSet {
                terms: shared,
                source: HighlightSource::Intersection,
            };
        }
        HighlightSet {
            terms: resume_ranked
                .iter()
                .take(self.fallback_count)
                .cloned()
                .collect(),
            source: HighlightSource::ResumeFallback,
        }
    }
}
