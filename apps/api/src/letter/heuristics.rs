//! Structural heuristics: job title, candidate name and achievement line.
//!
//! These are regex guesses over free text. They sit behind the
//! `ProfileHeuristics` trait so the composer can be tested with a fixed
//! strategy and the patterns can be swapped without touching it.

use once_cell::sync::Lazy;
use regex::Regex;

/// "Jane Doe" or "Name: Jane Doe" as a full line.
static NAME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?i:name)[:\-\s]*)?(\p{Lu}\p{Ll}+ \p{Lu}\p{Ll}+)$")
        .expect("name pattern is valid")
});

/// Achievement-flavored verbs, matched as whole words.
static ACHIEVEMENT_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:project|led|developed|built|created|improved)\b")
        .expect("achievement pattern is valid")
});

/// Each method returns `None` when nothing matches; the composer owns the fallbacks.
pub trait ProfileHeuristics: Send + Sync {
    fn job_title(&self, job_text: &str) -> Option<String>;
    fn candidate_name(&self, resume_text: &str) -> Option<String>;
    fn achievement_line(&self, resume_text: &str) -> Option<String>;
}

/// Default line-pattern strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternHeuristics;

impl ProfileHeuristics for PatternHeuristics {
    /// First non-empty line of the posting.
    fn job_title(&self, job_text: &str) -> Option<String> {
        job_text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(String::from)
    }

    /// First line that is exactly two capitalized words, optionally after a `name:` label.
    fn candidate_name(&self, resume_text: &str) -> Option<String> {
        resume_text.lines().map(str::trim).find_map(|line| {
            NAME_LINE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
    }

    /// First line mentioning one of the achievement verbs.
    fn achievement_line(&self, resume_text: &str) -> Option<String> {
        resume_text
            .lines()
            .map(str::trim)
            .find(|line| ACHIEVEMENT_VERB.is_match(line))
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_title_skips_blank_lines() {
        let h = PatternHeuristics;
        assert_eq!(
            h.job_title("\n   \n  Staff Data Engineer  \nRemote").as_deref(),
            Some("Staff Data Engineer")
        );
        assert_eq!(h.job_title(""), None);
        assert_eq!(h.job_title(" \n\t\n"), None);
    }

    #[test]
    fn test_candidate_name_plain_line() {
        let h = PatternHeuristics;
        assert_eq!(
            h.candidate_name("Jane Doe\nLed development of a billing platform.").as_deref(),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_candidate_name_with_label() {
        let h = PatternHeuristics;
        assert_eq!(
            h.candidate_name("Curriculum vitae\nName: Zoë Brandt\nBerlin").as_deref(),
            Some("Zoë Brandt")
        );
        assert_eq!(h.candidate_name("name - Omar Haddad").as_deref(), Some("Omar Haddad"));
    }

    #[test]
    fn test_candidate_name_requires_full_line() {
        let h = PatternHeuristics;
        assert_eq!(h.candidate_name("Jane Doe is a developer"), None);
        assert_eq!(h.candidate_name("JANE DOE"), None);
        assert_eq!(h.candidate_name("Jane Q Doe"), None);
    }

    #[test]
    fn test_achievement_line_matches_whole_words_case_insensitively() {
        let h = PatternHeuristics;
        let resume = "Jane Doe\nLedger reconciliation specialist\n  BUILT a payments gateway  \nLed a team";
        assert_eq!(
            h.achievement_line(resume).as_deref(),
            Some("BUILT a payments gateway")
        );
    }

    #[test]
    fn test_achievement_line_none_without_verbs() {
        let h = PatternHeuristics;
        assert_eq!(h.achievement_line("Jane Doe\nBerlin\nGerman, English"), None);
    }
}
