//! Process-wide corpus handle, loaded from disk on first use.
//!
//! There are no writers after the first successful load, so readers only ever
//! clone an `Arc`. A failed load is not cached; the next request tries again.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use pipepilot_core::corpus::Corpus;
use pipepilot_core::{Error, Result};

pub struct CorpusCache {
    path: PathBuf,
    label: String,
    cell: OnceLock<Arc<Corpus>>,
}

impl CorpusCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label, cell: OnceLock::new() }
    }

    /// Name reported to callers when the file is missing, in place of the resolved path.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// A cache that is already populated; `path` is informational only.
    pub fn preloaded(corpus: Corpus) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Arc::new(corpus));
        Self { path: PathBuf::new(), label: String::new(), cell }
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn is_loaded(&self) -> bool { self.cell.get().is_some() }

    pub fn get_or_load(&self) -> Result<Arc<Corpus>> {
        if let Some(corpus) = self.cell.get() {
            return Ok(Arc::clone(corpus));
        }
        let loaded = Corpus::load(&self.path).map_err(|e| match e {
            Error::CorpusUnavailable(_) => {
                tracing::warn!(path = %self.path.display(), "corpus file unavailable");
                Error::CorpusUnavailable(self.label.clone())
            }
            other => other,
        })?;
        let loaded = Arc::new(loaded);
        // Concurrent first loads may race; whichever lands first is kept.
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }
}
