//! Persistent digest record for tracking source changes between runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Source document path -> hex SHA-256 digest.
pub type DigestRecord = BTreeMap<String, String>;

/// Loads and saves the digest record at a fixed path.
#[derive(Debug, Clone)]
pub struct HashStore {
    path: PathBuf,
}

impl HashStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the digest record.
    ///
    /// Returns an empty record if the file doesn't exist.
    pub fn load(&self) -> Result<DigestRecord> {
        if !self.path.exists() {
            return Ok(DigestRecord::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let record: DigestRecord = serde_json::from_str(&content)?;
        log::debug!("Loaded {} digests from {:?}", record.len(), self.path);
        Ok(record)
    }

    /// Save the digest record, replacing any previous content.
    pub fn save(&self, record: &DigestRecord) -> Result<()> {
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, content)?;
        log::debug!("Saved {} digests to {:?}", record.len(), self.path);
        Ok(())
    }
}
