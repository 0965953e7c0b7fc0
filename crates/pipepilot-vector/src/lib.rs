//! pipepilot-vector
//!
//! Exact cosine-similarity ranking over an in-memory corpus, and the lazily
//! loaded process-wide corpus it ranks against.

pub mod cache;
pub mod search;

pub use cache::CorpusCache;
pub use search::{cosine, rank, DEFAULT_TOP_K};
