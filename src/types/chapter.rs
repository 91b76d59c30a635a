//! Chapter records assembled by the extractor

use serde::{Deserialize, Serialize};

/// One logical chapter's concatenated text.
///
/// Records are created by the chapter extractor by accumulating in-range
/// fragments until the next chapter heading or end of input, and are
/// immutable afterwards. `content` is never empty and `chapter_no` starts
/// at 1 within each source title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Sequential chapter number within the title, starting at 1
    pub chapter_no: u32,
    /// Source document title
    pub title: String,
    /// Page the chapter starts on
    pub page_label: u32,
    /// Concatenated chapter text
    pub content: String,
}

impl ChapterRecord {
    /// Display label in the corpus convention, e.g. `"CHAPTER 3"`
    pub fn chapter_label(&self) -> String {
        format!("CHAPTER {}", self.chapter_no)
    }
}
