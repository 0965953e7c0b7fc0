//! pipepilot-route
//!
//! Service-category taxonomy, the model-independent category normalizer, and
//! the soft-failing classification pipeline built on top of them.

pub mod classify;
pub mod normalize;
pub mod taxonomy;

pub use classify::{ClassificationResult, Classifier};
pub use normalize::{normalize, resolve, Resolution, Stage};
pub use taxonomy::Category;
