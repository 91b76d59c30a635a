//! Chapter extraction from page fragments
//!
//! A chapter boundary is a page whose text opens with a chapter heading
//! ("Chapter N ...", "CHAPTER N ...", or a bare "CHAPTER N" line) on a page
//! inside the title's configured valid range. Pages outside the range
//! (front and back matter) are dropped. Accumulation state is held per
//! title, so interleaved fragments from different books never bleed into
//! each other's chapters.

use std::collections::HashMap;

use regex::Regex;

use crate::config::PageRange;
use crate::error::{Error, Result};
use crate::types::{ChapterRecord, DocumentFragment};

/// Splits ordered page fragments into chapter records
pub struct ChapterExtractor {
    heading_patterns: Vec<Regex>,
    valid_ranges: HashMap<String, PageRange>,
}

/// Per-title accumulation state
#[derive(Default)]
struct TitleState {
    chapter_count: u32,
    contents: String,
    start_page: u32,
}

impl ChapterExtractor {
    /// Create an extractor with the configured per-title page ranges
    pub fn new(valid_ranges: HashMap<String, PageRange>) -> Self {
        let heading_patterns = vec![
            Regex::new(r"^Chapter \d.+\n").expect("Invalid regex"),
            Regex::new(r"^CHAPTER \d.+\n").expect("Invalid regex"),
            Regex::new(r"^CHAPTER \d+\n").expect("Invalid regex"),
        ];

        Self {
            heading_patterns,
            valid_ranges,
        }
    }

    /// Extract chapter records from fragments in document order.
    ///
    /// Fragments with unparseable page labels are skipped. A title missing
    /// from the configured ranges is a configuration error, not a silent
    /// drop. Chapter numbers restart at 1 for each title.
    pub fn extract(&self, fragments: &[DocumentFragment]) -> Result<Vec<ChapterRecord>> {
        let mut states: HashMap<String, TitleState> = HashMap::new();
        let mut chapters = Vec::new();

        for fragment in fragments {
            let page = match fragment.page_number() {
                Some(page) => page,
                None => {
                    tracing::debug!(
                        "skipping fragment of '{}' with unparseable page label '{}'",
                        fragment.title,
                        fragment.page_label
                    );
                    continue;
                }
            };

            let range = self.valid_ranges.get(&fragment.title).ok_or_else(|| {
                Error::Config(format!(
                    "no valid page range configured for title '{}'",
                    fragment.title
                ))
            })?;

            if !range.contains(page) {
                continue;
            }

            let state = states.entry(fragment.title.clone()).or_default();

            if self.is_chapter_heading(&fragment.content) {
                if !state.contents.is_empty() {
                    state.chapter_count += 1;
                    chapters.push(ChapterRecord {
                        chapter_no: state.chapter_count,
                        title: fragment.title.clone(),
                        page_label: state.start_page,
                        content: std::mem::take(&mut state.contents),
                    });
                }
                state.contents = fragment.content.clone();
                state.start_page = page;
            } else {
                if state.contents.is_empty() {
                    state.start_page = page;
                }
                state.contents.push_str(&fragment.content);
            }
        }

        // Flush trailing accumulators; sorted by title for stable output
        let mut remaining: Vec<(String, TitleState)> = states.into_iter().collect();
        remaining.sort_by(|a, b| a.0.cmp(&b.0));

        for (title, mut state) in remaining {
            if !state.contents.is_empty() {
                state.chapter_count += 1;
                chapters.push(ChapterRecord {
                    chapter_no: state.chapter_count,
                    title,
                    page_label: state.start_page,
                    content: state.contents,
                });
            }
        }

        tracing::info!(
            "extracted {} chapters from {} fragments",
            chapters.len(),
            fragments.len()
        );
        Ok(chapters)
    }

    fn is_chapter_heading(&self, text: &str) -> bool {
        self.heading_patterns.iter().any(|p| p.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(title: &str, start: u32, end: u32) -> HashMap<String, PageRange> {
        let mut map = HashMap::new();
        map.insert(title.to_string(), PageRange { start, end });
        map
    }

    #[test]
    fn single_chapter_spanning_two_pages() {
        let extractor = ChapterExtractor::new(ranges("T", 1, 2));
        let fragments = vec![
            DocumentFragment::new("T", "1", "Chapter 1 Intro\nOpening text. "),
            DocumentFragment::new("T", "2", "more text"),
        ];

        let chapters = extractor.extract(&fragments).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].chapter_label(), "CHAPTER 1");
        assert_eq!(chapters[0].page_label, 1);
        assert_eq!(
            chapters[0].content,
            "Chapter 1 Intro\nOpening text. more text"
        );
    }

    #[test]
    fn heading_flushes_previous_chapter() {
        let extractor = ChapterExtractor::new(ranges("T", 1, 10));
        let fragments = vec![
            DocumentFragment::new("T", "1", "Chapter 1 First\nbody one. "),
            DocumentFragment::new("T", "2", "still chapter one. "),
            DocumentFragment::new("T", "3", "CHAPTER 2 Second\nbody two."),
        ];

        let chapters = extractor.extract(&fragments).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].chapter_no, 1);
        assert_eq!(chapters[0].page_label, 1);
        assert!(chapters[0].content.contains("still chapter one"));
        assert_eq!(chapters[1].chapter_no, 2);
        assert_eq!(chapters[1].page_label, 3);
        assert!(chapters[1].content.starts_with("CHAPTER 2 Second"));
    }

    #[test]
    fn out_of_range_pages_are_dropped() {
        let extractor = ChapterExtractor::new(ranges("T", 5, 10));
        let fragments = vec![
            DocumentFragment::new("T", "1", "Chapter 1 Preface\nfront matter. "),
            DocumentFragment::new("T", "5", "Chapter 1 Real\nreal body. "),
            DocumentFragment::new("T", "11", "back matter"),
        ];

        let chapters = extractor.extract(&fragments).unwrap();
        assert_eq!(chapters.len(), 1);
        assert!(chapters[0].content.starts_with("Chapter 1 Real"));
        assert!(!chapters[0].content.contains("front matter"));
        assert!(!chapters[0].content.contains("back matter"));
    }

    #[test]
    fn every_chapter_page_lies_in_range() {
        let extractor = ChapterExtractor::new(ranges("T", 3, 8));
        let fragments: Vec<DocumentFragment> = (1..=12)
            .map(|p| {
                let text = if p % 4 == 1 {
                    format!("Chapter {} Heading\npage {} text. ", p / 4 + 1, p)
                } else {
                    format!("page {} text. ", p)
                };
                DocumentFragment::new("T", p.to_string(), text)
            })
            .collect();

        let range = PageRange { start: 3, end: 8 };
        for chapter in extractor.extract(&fragments).unwrap() {
            assert!(range.contains(chapter.page_label));
            assert!(!chapter.content.is_empty());
        }
    }

    #[test]
    fn unparseable_page_labels_are_skipped() {
        let extractor = ChapterExtractor::new(ranges("T", 1, 10));
        let fragments = vec![
            DocumentFragment::new("T", "xiv", "roman-numeral front matter"),
            DocumentFragment::new("T", "1", "Chapter 1 Intro\nbody."),
        ];

        let chapters = extractor.extract(&fragments).unwrap();
        assert_eq!(chapters.len(), 1);
        assert!(!chapters[0].content.contains("roman-numeral"));
    }

    #[test]
    fn unknown_title_is_a_config_error() {
        let extractor = ChapterExtractor::new(ranges("Known", 1, 10));
        let fragments = vec![DocumentFragment::new("Unknown", "1", "text")];

        let err = extractor.extract(&fragments).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn titles_do_not_share_accumulators() {
        let mut map = ranges("A", 1, 10);
        map.insert("B".to_string(), PageRange { start: 1, end: 10 });
        let extractor = ChapterExtractor::new(map);

        let fragments = vec![
            DocumentFragment::new("A", "1", "Chapter 1 Alpha\nalpha body. "),
            DocumentFragment::new("B", "1", "Chapter 1 Beta\nbeta body. "),
            DocumentFragment::new("A", "2", "alpha continues."),
        ];

        let chapters = extractor.extract(&fragments).unwrap();
        assert_eq!(chapters.len(), 2);

        let alpha = chapters.iter().find(|c| c.title == "A").unwrap();
        let beta = chapters.iter().find(|c| c.title == "B").unwrap();
        assert_eq!(alpha.chapter_no, 1);
        assert_eq!(beta.chapter_no, 1);
        assert!(alpha.content.contains("alpha continues"));
        assert!(!alpha.content.contains("beta"));
        assert!(!beta.content.contains("alpha"));
    }

    #[test]
    fn out_of_range_heading_does_not_open_chapter() {
        let extractor = ChapterExtractor::new(ranges("T", 2, 10));
        let fragments = vec![
            DocumentFragment::new("T", "1", "CHAPTER 1\nignored heading page. "),
            DocumentFragment::new("T", "2", "in-range continuation."),
        ];

        let chapters = extractor.extract(&fragments).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].page_label, 2);
        assert_eq!(chapters[0].content, "in-range continuation.");
    }

    #[test]
    fn bare_uppercase_heading_needs_newline() {
        let extractor = ChapterExtractor::new(ranges("T", 1, 10));
        assert!(extractor.is_chapter_heading("CHAPTER 12\nbody"));
        assert!(!extractor.is_chapter_heading("CHAPTER 12"));
        assert!(!extractor.is_chapter_heading("see CHAPTER 12\nfor details"));
    }
}
