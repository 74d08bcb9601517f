//! Change detection over rule source documents.
//!
//! Every run hashes each source document and compares the digest with the
//! record left by the previous run. Documents are classified as added,
//! modified or removed; unchanged documents are not reported.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::hash_store::{DigestRecord, HashStore};
use crate::source::{list_documents, path_key};
use crate::Result;

/// Classification of source documents against the previous run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Documents present before whose content changed
    pub modified: Vec<String>,
    /// Documents not seen before
    pub added: Vec<String>,
    /// Documents seen before but gone now
    pub removed: Vec<String>,
}

impl ChangeSet {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of changed documents.
    pub fn len(&self) -> usize {
        self.modified.len() + self.added.len() + self.removed.len()
    }

    /// Compare the stored record with freshly scanned digests.
    ///
    /// `added` and `modified` follow the order of `scanned`; `removed`
    /// follows the key order of `old`.
    pub fn between(old: &DigestRecord, scanned: &[(String, String)]) -> Self {
        let mut changes = ChangeSet::default();

        for (path, digest) in scanned {
            match old.get(path) {
                None => changes.added.push(path.clone()),
                Some(previous) if previous != digest => changes.modified.push(path.clone()),
                Some(_) => {}
            }
        }

        changes.removed = old
            .keys()
            .filter(|path| !scanned.iter().any(|(p, _)| p == *path))
            .cloned()
            .collect();

        changes
    }
}

/// Compute the hex SHA-256 digest of a file's bytes.
pub fn file_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Detects changed source documents using a [`HashStore`].
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    store: HashStore,
}

impl ChangeDetector {
    /// Create a detector backed by `store`.
    pub fn new(store: HashStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &HashStore {
        &self.store
    }

    /// Digest every document under `source_dirs`, in directory order and
    /// sorted by path within each directory.
    pub fn scan<P: AsRef<Path>>(&self, source_dirs: &[P]) -> Result<Vec<(String, String)>> {
        let mut scanned = Vec::new();
        for dir in source_dirs {
            for path in list_documents(dir.as_ref())? {
                let digest = file_digest(&path)?;
                scanned.push((path_key(&path), digest));
            }
        }
        Ok(scanned)
    }

    /// Classify documents against the stored record.
    ///
    /// Nothing is persisted; pass the returned record to [`commit`] once it
    /// should become the baseline for the next run.
    ///
    /// [`commit`]: ChangeDetector::commit
    pub fn detect<P: AsRef<Path>>(&self, source_dirs: &[P]) -> Result<(ChangeSet, DigestRecord)> {
        let old = self.store.load()?;
        let scanned = self.scan(source_dirs)?;
        let changes = ChangeSet::between(&old, &scanned);
        let new: DigestRecord = scanned.into_iter().collect();
        log::info!(
            "Detected {} modified, {} added, {} removed of {} documents",
            changes.modified.len(),
            changes.added.len(),
            changes.removed.len(),
            new.len()
        );
        Ok((changes, new))
    }

    /// Replace the stored record.
    pub fn commit(&self, record: &DigestRecord) -> Result<()> {
        self.store.save(record)
    }

    /// Detect and immediately persist the new record.
    pub fn detect_and_commit<P: AsRef<Path>>(
        &self,
        source_dirs: &[P],
    ) -> Result<(ChangeSet, DigestRecord)> {
        let (changes, record) = self.detect(source_dirs)?;
        self.commit(&record)?;
        Ok((changes, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, PathBuf, PathBuf, ChangeDetector) {
        let dir = tempdir().unwrap();
        let geosite = dir.path().join("geosite");
        let geoip = dir.path().join("geoip");
        fs::create_dir_all(&geosite).unwrap();
        fs::create_dir_all(&geoip).unwrap();
        fs::write(geosite.join("cn.yaml"), "payload:\n  - baidu.com\n").unwrap();
        fs::write(geosite.join("google.yaml"), "payload:\n  - google.com\n").unwrap();
        fs::write(geoip.join("cn.yaml"), "payload:\n  - 1.0.1.0/24\n").unwrap();
        let detector = ChangeDetector::new(HashStore::new(dir.path().join("rule_hashes.json")));
        (dir, geosite, geoip, detector)
    }

    fn key(path: PathBuf) -> String {
        path_key(&path)
    }

    #[test]
    fn test_file_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "").unwrap();
        assert_eq!(
            file_digest(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        fs::write(&path, "abc").unwrap();
        assert_eq!(
            file_digest(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_first_run_all_added() {
        let (_dir, geosite, geoip, detector) = setup();
        let (changes, record) = detector.detect_and_commit(&[&geosite, &geoip]).unwrap();

        assert_eq!(changes.added.len(), 3);
        assert!(changes.modified.is_empty());
        assert!(changes.removed.is_empty());
        assert_eq!(record.len(), 3);
        assert_eq!(detector.store().load().unwrap(), record);
    }

    #[test]
    fn test_unchanged_rerun() {
        let (_dir, geosite, geoip, detector) = setup();
        detector.detect_and_commit(&[&geosite, &geoip]).unwrap();

        let (changes, _) = detector.detect_and_commit(&[&geosite, &geoip]).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_modified_single_document() {
        let (_dir, geosite, geoip, detector) = setup();
        detector.detect_and_commit(&[&geosite, &geoip]).unwrap();

        fs::write(geosite.join("cn.yaml"), "payload:\n  - qq.com\n").unwrap();
        let (changes, _) = detector.detect_and_commit(&[&geosite, &geoip]).unwrap();

        assert_eq!(changes.modified, vec![key(geosite.join("cn.yaml"))]);
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn test_removed_document() {
        let (_dir, geosite, geoip, detector) = setup();
        detector.detect_and_commit(&[&geosite, &geoip]).unwrap();

        fs::remove_file(geoip.join("cn.yaml")).unwrap();
        let (changes, record) = detector.detect_and_commit(&[&geosite, &geoip]).unwrap();

        assert_eq!(changes.removed, vec![key(geoip.join("cn.yaml"))]);
        assert!(changes.added.is_empty());
        assert!(changes.modified.is_empty());
        assert!(!record.contains_key(&key(geoip.join("cn.yaml"))));
    }

    #[test]
    fn test_detect_does_not_persist() {
        let (_dir, geosite, geoip, detector) = setup();
        detector.detect(&[&geosite, &geoip]).unwrap();
        assert!(!detector.store().path().exists());

        // Without a commit the next run still sees everything as added.
        let (changes, _) = detector.detect(&[&geosite, &geoip]).unwrap();
        assert_eq!(changes.added.len(), 3);
    }

    #[test]
    fn test_domain_directory_reported_first() {
        let (_dir, geosite, geoip, detector) = setup();
        let (changes, _) = detector.detect(&[&geosite, &geoip]).unwrap();
        assert_eq!(
            changes.added,
            vec![
                key(geosite.join("cn.yaml")),
                key(geosite.join("google.yaml")),
                key(geoip.join("cn.yaml")),
            ]
        );
    }

    #[test]
    fn test_change_set_between() {
        let mut old = DigestRecord::new();
        old.insert("a".to_string(), "1".to_string());
        old.insert("b".to_string(), "2".to_string());
        old.insert("c".to_string(), "3".to_string());

        let scanned = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "20".to_string()),
            ("d".to_string(), "4".to_string()),
        ];

        let changes = ChangeSet::between(&old, &scanned);
        assert_eq!(changes.modified, vec!["b".to_string()]);
        assert_eq!(changes.added, vec!["d".to_string()]);
        assert_eq!(changes.removed, vec!["c".to_string()]);
        assert_eq!(changes.len(), 3);
    }
}
