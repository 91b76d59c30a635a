//! Chapter text cleanup before chunking

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalizes chapter text for embedding: NFKC normalization, removal of
/// residual heading lines and code blocks, a character whitelist and
/// whitespace collapsing.
pub struct TextCleaner {
    chapter_heading: Regex,
    section_heading: Regex,
    code_block: Regex,
    disallowed: Regex,
    whitespace: Regex,
}

impl TextCleaner {
    /// Build the cleaner with its compiled patterns
    pub fn new() -> Self {
        Self {
            // Running-header artifacts like "12 Chapter 2 Linear Models"
            chapter_heading: Regex::new(r"(?m)^\d+\s+Chapter\s+\d+\s+.*\n")
                .expect("Invalid regex"),
            section_heading: Regex::new(r"(?m)^Section\s+\d+(?:\.\d+)?\s+.*\n")
                .expect("Invalid regex"),
            code_block: Regex::new(r"(?s)```.*?```").expect("Invalid regex"),
            disallowed: Regex::new(r"[^A-Za-z0-9.,;:\(\)\{\}\[\]\+\-\*/=<>%&\|\^\$#@~\n]")
                .expect("Invalid regex"),
            whitespace: Regex::new(r"\s+").expect("Invalid regex"),
        }
    }

    /// Clean one chapter's text
    pub fn clean(&self, text: &str) -> String {
        let text: String = text.nfkc().collect();
        let text = self.chapter_heading.replace_all(&text, "");
        let text = self.section_heading.replace_all(&text, "");
        let text = self.code_block.replace_all(&text, "");
        let text = self.disallowed.replace_all(&text, " ");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_heading_artifacts() {
        let cleaner = TextCleaner::new();
        let text = "12 Chapter 2 Linear Models\nSection 2.1 Basics\nReal content here.";
        assert_eq!(cleaner.clean(text), "Real content here.");
    }

    #[test]
    fn removes_code_blocks() {
        let cleaner = TextCleaner::new();
        let text = "Before. ```fn main() {}``` After.";
        assert_eq!(cleaner.clean(text), "Before. After.");
    }

    #[test]
    fn collapses_whitespace() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean("a\n\n  b\t c"), "a b c");
    }

    #[test]
    fn normalizes_unicode_forms() {
        let cleaner = TextCleaner::new();
        // Fullwidth digits normalize to ASCII under NFKC
        assert_eq!(cleaner.clean("ＡＩ ｉｓ １"), "AI is 1");
    }
}
