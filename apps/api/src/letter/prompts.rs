// Prompt text for the LLM letter backend. Job and resume text are inserted
// verbatim in a single formatting pass.

pub const LETTER_SYSTEM: &str = "You are a professional resume and cover letter writer. \
    Respond with the cover letter text only. \
    Do NOT include a subject line, notes, or explanations.";

/// Fills the letter prompt.
pub fn build_letter_prompt(resume_text: &str, job_text: &str) -> String {
    format!(
        "Generate a concise, persuasive cover letter (approx. 3 short paragraphs) tailored to the \
following job posting and resume.

Job posting:

{job_text}

Resume:

{resume_text}

Produce only the cover letter."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_both_texts() {
        let prompt = build_letter_prompt("RESUME BODY", "JOB BODY");
        let job_at = prompt.find("JOB BODY").unwrap();
        let resume_at = prompt.find("RESUME BODY").unwrap();
        assert!(job_at < resume_at);
        assert!(!prompt.contains("{job_text}"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_placeholder_text_in_job_is_kept_literally() {
        let prompt = build_letter_prompt("RESUME BODY", "Use {resume_text} here");
        assert!(prompt.contains("Use {resume_text} here"));
        assert_eq!(prompt.matches("RESUME BODY").count(), 1);
    }
}
