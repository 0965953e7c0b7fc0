//! Splits raw `.txt` knowledge-base files into passages ready to be embedded.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// An unembedded passage; `id` is `<file-stem>:<index>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub max_words: usize,
    pub overlap_percent: f32,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_words: 300, overlap_percent: 0.2 }
    }
}

#[derive(Default)]
pub struct PassageSplitter {
    chunking_config: ChunkingConfig,
}

impl PassageSplitter {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(chunking_config: ChunkingConfig) -> Self { Self { chunking_config } }

    /// Read every `.txt` file under `data_dir` (sorted by path) and split it into passages.
    /// Passages whose text already appeared earlier are dropped.
    pub fn process_directory(&self, data_dir: &Path) -> Result<Vec<Passage>> {
        let files = list_txt_files(data_dir);
        if files.is_empty() {
            tracing::warn!(dir = %data_dir.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut seen = HashSet::new();
        let mut passages = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            tracing::debug!(file = %file_path.display(), "processing file {}/{}", file_index + 1, files.len());
            let content = read_file_content(file_path)?;
            let stem = file_path.file_stem().map_or_else(|| "doc".to_string(), |s| s.to_string_lossy().to_string());
            for passage in self.split(&stem, &content) {
                if seen.insert(blake3::hash(passage.text.as_bytes())) {
                    passages.push(passage);
                } else {
                    tracing::debug!(id = %passage.id, "skipping duplicate passage");
                }
            }
        }
        tracing::info!(files = files.len(), passages = passages.len(), "split knowledge base");
        Ok(passages)
    }

    /// Split one document into paragraph passages; oversized paragraphs become
    /// overlapping word windows.
    pub fn split(&self, stem: &str, content: &str) -> Vec<Passage> {
        let mut texts = Vec::new();
        for paragraph in content.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            if paragraph.split_whitespace().count() <= self.chunking_config.max_words {
                texts.push(paragraph.split_whitespace().collect::<Vec<_>>().join(" "));
            } else {
                texts.extend(self.split_paragraph_with_overlap(paragraph));
            }
        }
        texts.into_iter().enumerate().map(|(i, text)| Passage { id: format!("{stem}:{i}"), text }).collect()
    }

    fn split_paragraph_with_overlap(&self, paragraph: &str) -> Vec<String> {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        let words_per_chunk = self.chunking_config.max_words.max(1);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let overlap_words = ((words_per_chunk as f32 * self.chunking_config.overlap_percent) as usize).min(words_per_chunk - 1);
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + words_per_chunk).min(words.len());
            chunks.push(words[start..end].join(" "));
            if end >= words.len() { break; }
            start = end - overlap_words;
        }
        chunks
    }
}

fn read_file_content(file_path: &Path) -> Result<String> {
    let bytes = fs::read(file_path).map_err(|e| Error::InvalidConfig(format!("{}: {e}", file_path.display())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    txt_files.sort();
    txt_files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_paragraph_windows_overlap() {
        let splitter = PassageSplitter::with_config(ChunkingConfig { max_words: 4, overlap_percent: 0.5 });
        let text = "a b c d e f g h";
        let passages = splitter.split("doc", text);
        let texts: Vec<&str> = passages.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["a b c d", "c d e f", "e f g h"]);
        assert_eq!(passages[2].id, "doc:2");
    }

    #[test]
    fn full_overlap_still_advances() {
        let splitter = PassageSplitter::with_config(ChunkingConfig { max_words: 2, overlap_percent: 1.0 });
        let passages = splitter.split("doc", "a b c");
        assert_eq!(passages.len(), 2);
    }
}
