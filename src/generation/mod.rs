//! Prompt assembly and model response parsing

pub mod parser;
pub mod prompt;

pub use parser::{ParsedResponse, ResponseParser, FOLLOW_UP_MARKER};
pub use prompt::PromptBuilder;
