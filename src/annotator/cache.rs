use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Annotator;
use crate::models::NlpToken;

/// Precomputed annotations keyed by the exact sentence text sent to the
/// annotator
///
/// Stored on disk as a JSON object mapping sentence text to its token list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationCache {
    sentences: BTreeMap<String, Vec<NlpToken>>,
}

impl AnnotationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text: impl Into<String>, tokens: Vec<NlpToken>) {
        self.sentences.insert(text.into(), tokens);
    }

    pub fn get(&self, text: &str) -> Option<&[NlpToken]> {
        self.sentences.get(text).map(Vec::as_slice)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.sentences.contains_key(text)
    }

    /// Number of cached sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse annotation JSON")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        Self::from_json(&content)
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

impl Annotator for AnnotationCache {
    fn annotate(&self, text: &str) -> Result<Vec<NlpToken>> {
        self.get(text)
            .map(<[NlpToken]>::to_vec)
            .with_context(|| format!("No annotation cached for sentence {:?}", text))
    }
}
