// Text sources feeding both pipelines: uploaded resume files and fetched job
// postings. Everything here is I/O; the output is always plain UTF-8 text.

pub mod extract;
pub mod handlers;
pub mod job_posting;

pub use extract::TextExtractor;
pub use job_posting::JobPostingFetcher;
