//! Parsing of raw model completions into answer and follow-up questions

use regex::Regex;

/// Literal marker separating the answer from the follow-up section
pub const FOLLOW_UP_MARKER: &str = "Follow up questions:";

/// A model completion split into its answer and follow-up questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub answer: String,
    pub follow_ups: Vec<String>,
}

/// Extracts the answer text and numbered follow-up questions from a raw
/// completion. A missing marker is a degraded-but-valid result, never an
/// error.
pub struct ResponseParser {
    numbering: Regex,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            numbering: Regex::new(r"^\s*\d+\.\s*").expect("Invalid regex"),
        }
    }

    /// Parse a raw completion.
    ///
    /// The text after the marker is split on `?`; each fragment has its
    /// leading ordinal numbering stripped. A non-empty final fragment is
    /// trailing prose rather than a question and is folded back into the
    /// answer; an empty one is discarded.
    pub fn parse(&self, raw_text: &str) -> ParsedResponse {
        let Some((answer, tail)) = raw_text.split_once(FOLLOW_UP_MARKER) else {
            return ParsedResponse {
                answer: raw_text.trim().to_string(),
                follow_ups: Vec::new(),
            };
        };

        let mut answer = answer.trim_end().to_string();
        let mut fragments: Vec<&str> = tail.split('?').collect();

        // The text after the final '?' is not a question
        if let Some(remainder) = fragments.pop() {
            let remainder = remainder.trim();
            if !remainder.is_empty() {
                answer.push(' ');
                answer.push_str(remainder);
            }
        }

        let follow_ups = fragments
            .into_iter()
            .map(|fragment| self.numbering.replace(fragment, "").trim().to_string())
            .filter(|question| !question.is_empty())
            .collect();

        ParsedResponse { answer, follow_ups }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}
