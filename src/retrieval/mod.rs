//! Query-time retrieval and prompt augmentation

pub mod augmenter;

pub use augmenter::RetrievalAugmenter;
