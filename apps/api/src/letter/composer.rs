//! Letter Composer: deterministic three-paragraph template.
//!
//! Inputs: resume text and job posting text. Either may be empty; when both
//! are, the letter is empty. Otherwise every slot the heuristics cannot fill
//! gets a literal fallback, so composition always succeeds.

use std::sync::Arc;

use serde::Serialize;

use crate::letter::heuristics::{PatternHeuristics, ProfileHeuristics};
use crate::matching::{HighlightSet, KeywordMatcher};

pub const FALLBACK_JOB_TITLE: &str = "the role";
pub const FALLBACK_CANDIDATE_NAME: &str = "[Your Name]";
pub const FALLBACK_ACHIEVEMENT: &str = "Relevant project experience and measurable outcomes.";
/// Used only when neither document yields a single term.
pub const FALLBACK_HIGHLIGHT: &str = "the areas described in your posting";

/// A composed letter. `paragraphs` is empty or exactly opening, body, closing.
#[derive(Debug, Clone, Serialize)]
pub struct Letter {
    pub job_title: String,
    pub candidate_name: String,
    pub achievement: String,
    pub highlight: HighlightSet,
    pub paragraphs: Vec<String>,
}

impl Letter {
    /// Paragraphs joined by one blank line. Paragraphs never contain a blank line themselves.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}

#[derive(Clone)]
pub struct LetterComposer {
    matcher: Arc<KeywordMatcher>,
    heuristics: Arc<dyn ProfileHeuristics>,
}

impl LetterComposer {
    pub fn new(matcher: Arc<KeywordMatcher>) -> Self {
        Self::with_heuristics(matcher, Arc::new(PatternHeuristics))
    }

    pub fn with_heuristics(
        matcher: Arc<KeywordMatcher>,
        heuristics: Arc<dyn ProfileHeuristics>,
    ) -> Self {
        Self {
            matcher,
            heuristics,
        }
    }

    pub fn compose(&self, resume_text: &str, job_text: &str) -> Letter {
        let highlight = self.matcher.highlight(resume_text, job_text);
        let job_title = self
            .heuristics
            .job_title(job_text)
            .unwrap_or_else(|| FALLBACK_JOB_TITLE.to_string());
        let candidate_name = self
            .heuristics
            .candidate_name(resume_text)
            .unwrap_or_else(|| FALLBACK_CANDIDATE_NAME.to_string());
        let achievement = self
            .heuristics
            .achievement_line(resume_text)
            .unwrap_or_else(|| FALLBACK_ACHIEVEMENT.to_string());

        if resume_text.trim().is_empty() && job_text.trim().is_empty() {
            return Letter {
                job_title,
                candidate_name,
                achievement,
                highlight,
                paragraphs: vec![],
            };
        }

        let phrase = highlight
            .phrase()
            .unwrap_or_else(|| FALLBACK_HIGHLIGHT.to_string());

        let opening = format!(
            "Dear Hiring Manager,\n\
             I am writing to express my interest in {job_title}. With proven experience in \
             {phrase} and a track record of delivering results, I am confident I would be a \
             strong fit for your team."
        );
        let body = format!(
            "In my previous roles I have demonstrated the skills and responsibilities you seek, \
             including {phrase}. My resume (attached) outlines accomplishments such as:\n\
             - {achievement}\n\
             I am excited about the opportunity to bring my experience to this position and to \
             contribute to your team's goals."
        );
        let closing = format!(
            "Thank you for considering my application. I look forward to the possibility of \
             discussing how my background aligns with your needs.\n\
             Sincerely,\n\
             {candidate_name}"
        );

        Letter {
            job_title,
            candidate_name,
            achievement,
            highlight,
            paragraphs: vec![opening, body, closing],
        }
    }
}
