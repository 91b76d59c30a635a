//! Token-bounded, sentence-aligned chunking
//!
//! Chunk boundaries respect the embedding model's actual token budget, so
//! token lengths are measured with the same subword vocabulary the model
//! uses rather than with a whitespace heuristic.

use std::path::Path;
use std::sync::Arc;

use tokenizers::Tokenizer;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

/// Measures tokenized text length for chunk budgeting
pub trait TokenCounter: Send + Sync {
    /// Number of subword tokens in `text`
    fn count(&self, text: &str) -> Result<usize>;
}

/// Token counter backed by a Hugging Face tokenizer vocabulary
pub struct HfTokenCounter {
    tokenizer: Tokenizer,
}

impl HfTokenCounter {
    /// Load a tokenizer from a `tokenizer.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let tokenizer = Tokenizer::from_file(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "failed to load tokenizer from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self { tokenizer })
    }
}

impl TokenCounter for HfTokenCounter {
    fn count(&self, text: &str) -> Result<usize> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| Error::Ingestion(format!("tokenization failed: {}", e)))?;
        Ok(encoding.get_ids().len())
    }
}

/// Greedily packs whole sentences into chunks of at most `max_tokens`
pub struct SentenceChunker {
    max_tokens: usize,
    counter: Arc<dyn TokenCounter>,
}

impl SentenceChunker {
    /// Create a chunker with the given token budget and counter
    pub fn new(max_tokens: usize, counter: Arc<dyn TokenCounter>) -> Self {
        Self {
            max_tokens,
            counter,
        }
    }

    /// Split `text` into ordered chunks of whole sentences.
    ///
    /// No sentence is split across chunks. A single sentence longer than
    /// the budget is emitted as its own chunk; that overflow is
    /// unavoidable without breaking sentence alignment.
    pub fn chunk(&self, text: &str) -> Result<Vec<String>> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_tokens = 0usize;

        for sentence in text.split_sentence_bounds() {
            let tokens = self.counter.count(sentence)?;

            if !current.is_empty() && current_tokens + tokens > self.max_tokens {
                push_chunk(&mut chunks, &mut current);
                current_tokens = 0;
            }

            current.push_str(sentence);
            current_tokens += tokens;
        }

        push_chunk(&mut chunks, &mut current);
        Ok(chunks)
    }
}

fn push_chunk(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts whitespace-separated words, standing in for a subword
    /// vocabulary in tests
    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn count(&self, text: &str) -> Result<usize> {
            Ok(text.split_whitespace().count())
        }
    }

    fn chunker(max_tokens: usize) -> SentenceChunker {
        SentenceChunker::new(max_tokens, Arc::new(WordCounter))
    }

    fn sentence_of(words: usize) -> String {
        let mut s = vec!["word"; words].join(" ");
        s.push_str(". ");
        s
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunker(256).chunk("").unwrap().is_empty());
        assert!(chunker(256).chunk("   \n ").unwrap().is_empty());
    }

    #[test]
    fn two_large_sentences_split_into_two_chunks() {
        // Two sentences of ~100 tokens against a budget of 150
        let text = format!("{}{}", sentence_of(100), sentence_of(100));
        let chunks = chunker(150).chunk(&text).unwrap();
        assert_eq!(chunks.len(), 2);
        for chunk in &chunks {
            assert!(chunk.split_whitespace().count() <= 150);
        }
    }

    #[test]
    fn small_sentences_pack_together() {
        let text = format!("{}{}{}", sentence_of(10), sentence_of(10), sentence_of(10));
        let chunks = chunker(256).chunk(&text).unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn oversized_sentence_is_kept_whole() {
        let text = format!("{}{}", sentence_of(300), sentence_of(5));
        let chunks = chunker(256).chunk(&text).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].split_whitespace().count() > 256);
        assert!(chunks[1].split_whitespace().count() <= 256);
    }

    #[test]
    fn rechunking_a_chunk_is_identity() {
        let text = format!("{}{}{}", sentence_of(20), sentence_of(20), sentence_of(20));
        let chunks = chunker(256).chunk(&text).unwrap();
        assert_eq!(chunks.len(), 1);

        let rechunked = chunker(256).chunk(&chunks[0]).unwrap();
        assert_eq!(rechunked, chunks);
    }

    #[test]
    fn sentence_order_is_preserved() {
        let text = "First sentence here. Second sentence follows. Third one closes.";
        let chunks = chunker(6).chunk(text).unwrap();
        let rejoined = chunks.join(" ");
        let first = rejoined.find("First").unwrap();
        let second = rejoined.find("Second").unwrap();
        let third = rejoined.find("Third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn no_sentence_is_split_across_chunks() {
        let text = format!("{}{}{}", sentence_of(40), sentence_of(40), sentence_of(40));
        let chunks = chunker(50).chunk(&text).unwrap();
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.ends_with('.'));
        }
    }
}
