//! Corpus ingestion: loading, cleaning, chapter extraction and chunking

mod chunker;
mod cleaner;
mod extractor;
mod loader;

pub use chunker::{HfTokenCounter, SentenceChunker, TokenCounter};
pub use cleaner::TextCleaner;
pub use extractor::ChapterExtractor;
pub use loader::PageLoader;
