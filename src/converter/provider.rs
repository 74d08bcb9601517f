//! Rule provider documents and their conversion to `.list` files.

use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::list_documents;
use crate::{Error, Result, RuleKind};

/// Extension of generated rule files.
pub const LIST_EXTENSION: &str = "list";

/// Raw provider document as found on disk.
#[derive(Debug, Deserialize)]
struct RawProvider {
    #[serde(default)]
    payload: Option<Value>,
}

/// A parsed rule provider with a non-empty payload.
#[derive(Debug, Clone)]
pub struct ProviderDocument {
    payload: Vec<Value>,
}

impl ProviderDocument {
    /// Parse provider YAML content.
    ///
    /// Fails when the content is not a YAML mapping or its `payload` is
    /// missing, empty or not a list.
    pub fn parse(content: &str) -> Result<Self> {
        Self::from_raw(serde_yaml::from_str(content)?)
    }

    /// Parse provider YAML bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_raw(serde_yaml::from_slice(bytes)?)
    }

    fn from_raw(raw: RawProvider) -> Result<Self> {
        match raw.payload {
            None | Some(Value::Null) => Err(Error::InvalidDocument("missing payload".into())),
            Some(Value::Sequence(items)) if items.is_empty() => {
                Err(Error::InvalidDocument("empty payload".into()))
            }
            Some(Value::Sequence(items)) => Ok(Self { payload: items }),
            Some(_) => Err(Error::InvalidDocument("payload is not a list".into())),
        }
    }

    /// String entries of the payload, in order. Other entries are skipped.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.payload.iter().filter_map(Value::as_str)
    }

    /// Number of raw payload entries, including non-string ones.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Always false for a parsed document.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Render the document as rule lines, each terminated by `\n`.
    pub fn render(&self, kind: RuleKind) -> String {
        let mut out = String::new();
        for entry in self.entries() {
            out.push_str(&kind.format_entry(entry));
            out.push('\n');
        }
        out
    }
}

/// Result of converting one source directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSummary {
    /// Generated rule files
    pub written: Vec<PathBuf>,
    /// Source documents skipped as invalid
    pub skipped: Vec<PathBuf>,
    /// Total rule lines written
    pub rules: usize,
}

/// Output file for a source document: `<output_dir>/<stem>.list`.
pub fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    let mut name = source.file_stem().unwrap_or(source.as_os_str()).to_os_string();
    name.push(".");
    name.push(LIST_EXTENSION);
    output_dir.join(name)
}

/// Convert every document in `source_dir` into a rule file in `output_dir`.
///
/// Documents that fail to parse or have no payload are logged and skipped.
/// Filesystem errors abort the batch.
pub fn transform_rules(
    kind: RuleKind,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<TransformSummary> {
    log::info!("Processing {} rules from {:?}", kind, source_dir);
    let mut summary = TransformSummary::default();

    for source in list_documents(source_dir)? {
        let bytes = fs::read(&source)?;
        let document = match ProviderDocument::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) if e.is_document_error() => {
                log::warn!("Skipping {:?}: {}", source, e);
                summary.skipped.push(source);
                continue;
            }
            Err(e) => return Err(e),
        };

        let output = output_path(&source, output_dir);
        let content = document.render(kind);
        let count = document.entries().count();
        fs::write(&output, content)?;
        log::info!("Generated {:?} ({} rules)", output, count);

        summary.rules += count;
        summary.written.push(output);
    }

    Ok(summary)
}

/// Convert geosite documents into `DOMAIN-SUFFIX` rule files.
pub fn transform_domain_rules(source_dir: &Path, output_dir: &Path) -> Result<TransformSummary> {
    transform_rules(RuleKind::Domain, source_dir, output_dir)
}

/// Convert geoip documents into `IP-CIDR` rule files.
pub fn transform_ip_rules(source_dir: &Path, output_dir: &Path) -> Result<TransformSummary> {
    transform_rules(RuleKind::IpCidr, source_dir, output_dir)
}
