//! Keyword coverage: how much of a job posting's top vocabulary the resume covers.
//!
//! Algorithm:
//! 1. Rank the job posting's top-N terms.
//! 2. A term is matched when the resume uses it at least once, otherwise missing.
//! 3. coverage = Σ(job count of matched) / Σ(job count of top-N) × 100
//!
//! Lexical only. Synonyms and stems do not match.

use serde::Serialize;

use crate::matching::frequency::TermFrequencyTable;
use crate::matching::relevance::top_terms;
use crate::matching::tokenizer::Term;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermWeight {
    pub term: Term,
    pub job_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// 0..=100
    pub coverage: u32,
    /// Job terms the resume also uses, in job-rank order.
    pub matched: Vec<TermWeight>,
    /// Job terms absent from the resume, in job-rank order.
    pub missing: Vec<TermWeight>,
    pub recommendation: String,
}

pub fn coverage_report(
    resume: &TermFrequencyTable,
    job: &TermFrequencyTable,
    top_n: usize,
) -> CoverageReport {
    let ranked = top_terms(job, top_n);
    if ranked.is_empty() {
        return CoverageReport {
            coverage: 0,
            matched: vec![],
            missing: vec![],
            recommendation: "No keywords found in the job posting.".to_string(),
        };
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total = 0u32;
    let mut covered = 0u32;

    for term in ranked {
        let job_count = job.count(term.as_str());
        total += job_count;
        let weight = TermWeight { term, job_count };
        if resume.contains(weight.term.as_str()) {
            covered += job_count;
            matched.push(weight);
        } else {
            missing.push(weight);
        }
    }

    let coverage = if total > 0 {
        ((covered as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };
    let recommendation = build_recommendation(coverage, &missing);

    CoverageReport {
        coverage,
        matched,
        missing,
        recommendation,
    }
}

fn build_recommendation(coverage: u32, missing: &[TermWeight]) -> String {
    let top_missing: Vec<&str> = missing.iter().take(3).map(|m| m.term.as_str()).collect();

    if coverage >= 80 {
        "Strong overlap. The resume already uses most of the posting's key terms.".to_string()
    } else if coverage >= 50 {
        format!(
            "Moderate overlap ({coverage}/100). Consider mentioning: {}.",
            top_missing.join(", ")
        )
    } else {
        format!(
            "Low overlap ({coverage}/100). The posting emphasises: {}.",
            top_missing.join(", ")
        )
    }
}
