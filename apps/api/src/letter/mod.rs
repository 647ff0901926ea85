// Letter generation: structural heuristics + keyword highlight set → fixed
// three-paragraph template. An optional LLM backend sits behind the same
// LetterWriter trait. All LLM calls go through llm_client.

pub mod composer;
pub mod handlers;
pub mod heuristics;
pub mod prompts;
pub mod writer;
