//! Source document discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Extension of rule provider documents.
pub const SOURCE_EXTENSION: &str = "yaml";

/// List the rule documents directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into and hidden files are ignored.
/// Symlinks are followed. A missing directory has no documents.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::debug!("Source directory {:?} not present", dir);
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') || !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION) {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Record key for a document path.
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
