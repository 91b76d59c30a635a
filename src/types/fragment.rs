//! Page-level document fragments produced by the loader

use serde::{Deserialize, Serialize};

/// One page of source text with its loader-supplied metadata.
///
/// Fragments are immutable once loaded; the chapter extractor consumes them
/// in document order. `page_label` is kept as the raw string the loader
/// produced — labels that do not parse as integers (roman-numeral front
/// matter, blank labels) are skipped during extraction rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFragment {
    /// Source document identifier (book title)
    pub title: String,
    /// 1-based page number as reported by the loader
    pub page_label: String,
    /// Raw page text
    pub content: String,
}

impl DocumentFragment {
    /// Create a fragment with an already-numeric page label
    pub fn new(
        title: impl Into<String>,
        page_label: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            page_label: page_label.into(),
            content: content.into(),
        }
    }

    /// Parse the page label as a page number, if possible
    pub fn page_number(&self) -> Option<u32> {
        self.page_label.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_labels_parse() {
        let frag = DocumentFragment::new("T", "42", "text");
        assert_eq!(frag.page_number(), Some(42));
    }

    #[test]
    fn non_numeric_labels_yield_none() {
        assert_eq!(DocumentFragment::new("T", "xiv", "text").page_number(), None);
        assert_eq!(DocumentFragment::new("T", "", "text").page_number(), None);
    }
}
