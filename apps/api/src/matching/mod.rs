// Term relevance: tokenizer → frequency index → ranked terms → highlight set.
// Pure and synchronous. Nothing here allocates shared state or performs I/O.

pub mod coverage;
pub mod frequency;
pub mod highlight;
pub mod relevance;
pub mod tokenizer;

pub use frequency::Stopwords;
pub use relevance::{HighlightSet, KeywordMatcher};
