//! Pipeline configuration types.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{Error, RuleKind};

/// Default directory holding the upstream rule dataset.
pub const DEFAULT_SOURCE_ROOT: &str = "meta-rules-dat";
/// Default digest record file.
pub const DEFAULT_STATE_FILE: &str = "rule_hashes.json";
/// Default update report file.
pub const DEFAULT_REPORT_FILE: &str = "update_report.txt";

/// When the new digest record is persisted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestCommit {
    /// Persist right after change detection, before any output is written.
    /// A failed transform still consumes the change signal.
    BeforeTransform,
    /// Persist only once both transforms have succeeded.
    #[default]
    AfterTransform,
}

impl DigestCommit {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestCommit::BeforeTransform => "before-transform",
            DigestCommit::AfterTransform => "after-transform",
        }
    }
}

impl fmt::Display for DigestCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DigestCommit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before-transform" | "before" => Ok(DigestCommit::BeforeTransform),
            "after-transform" | "after" => Ok(DigestCommit::AfterTransform),
            other => Err(Error::Config(format!("unknown digest commit policy: {}", other))),
        }
    }
}

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the upstream rule dataset; must exist before a run
    pub source_root: PathBuf,
    /// Directory with domain (geosite) documents
    pub domain_source: PathBuf,
    /// Directory with IP (geoip) documents
    pub ip_source: PathBuf,
    /// Destination for generated domain lists
    pub domain_output: PathBuf,
    /// Destination for generated IP lists
    pub ip_output: PathBuf,
    /// Persisted digest record
    pub state_file: PathBuf,
    /// Update report, overwritten every run
    pub report_file: PathBuf,
    /// When to persist the digest record
    pub digest_commit: DigestCommit,
}

impl PipelineConfig {
    /// Create a configuration with the default layout under `base`.
    pub fn with_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let source_root = base.join(DEFAULT_SOURCE_ROOT);
        Self {
            domain_source: source_root.join("geo").join("geosite"),
            ip_source: source_root.join("geo").join("geoip"),
            source_root,
            domain_output: base.join(RuleKind::Domain.name()),
            ip_output: base.join(RuleKind::IpCidr.name()),
            state_file: base.join(DEFAULT_STATE_FILE),
            report_file: base.join(DEFAULT_REPORT_FILE),
            digest_commit: DigestCommit::default(),
        }
    }

    /// Point at a different dataset root, keeping the `geo/<kind>` layout.
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.domain_source = root.join("geo").join("geosite");
        self.ip_source = root.join("geo").join("geoip");
        self.source_root = root;
        self
    }

    /// Set the digest record path.
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = path.into();
        self
    }

    /// Set the update report path.
    pub fn with_report_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_file = path.into();
        self
    }

    /// Set the digest commit policy.
    pub fn with_digest_commit(mut self, policy: DigestCommit) -> Self {
        self.digest_commit = policy;
        self
    }

    /// Source directory for a rule kind.
    pub fn source_dir(&self, kind: RuleKind) -> &Path {
        match kind {
            RuleKind::Domain => &self.domain_source,
            RuleKind::IpCidr => &self.ip_source,
        }
    }

    /// Output directory for a rule kind.
    pub fn output_dir(&self, kind: RuleKind) -> &Path {
        match kind {
            RuleKind::Domain => &self.domain_output,
            RuleKind::IpCidr => &self.ip_output,
        }
    }

    /// Source directories in processing order.
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        RuleKind::ALL
            .iter()
            .map(|k| self.source_dir(*k).to_path_buf())
            .collect()
    }

    /// Output directories in processing order.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        RuleKind::ALL
            .iter()
            .map(|k| self.output_dir(*k).to_path_buf())
            .collect()
    }
}

impl Default for PipelineConfig {
    /// Layout relative to the working directory.
    fn default() -> Self {
        Self::with_base("")
    }
}
