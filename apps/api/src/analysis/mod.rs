// Resume analysis pipeline.
// extract → sanitize → prompts → llm_client → parser → repair, with fixtures as the fallback.

pub mod analyzer;
pub mod extract;
pub mod fixtures;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod repair;
pub mod sanitize;
