//! geolist - Clash rule list generator for geosite/geoip datasets.
//!
//! This crate turns the YAML rule providers of a geosite/geoip dataset
//! (such as `meta-rules-dat`) into plain `.list` rule files that routing
//! tools consume directly, and tracks which providers changed between runs.
//!
//! # Features
//!
//! - **Change detection**: SHA-256 digests of every provider, diffed against
//!   the record of the previous run
//! - **Update report**: timestamped summary of modified, added and removed
//!   providers
//! - **List generation**: `DOMAIN-SUFFIX,<domain>` lines for geosite and
//!   `IP-CIDR,<cidr>` lines for geoip
//! - **Classical conversion**: single provider to `TYPE,value` rules
//!
//! # Quick Start
//!
//! ```ignore
//! use geolist::{pipeline, PipelineConfig, RunOutcome};
//!
//! let config = PipelineConfig::with_base("/srv/rules");
//! match pipeline::run(&config)? {
//!     RunOutcome::Completed(summary) => {
//!         println!("{} providers changed", summary.changes.len());
//!     }
//!     RunOutcome::MissingSourceRoot => {}
//! }
//! ```
//!
//! # Layout
//!
//! With the default configuration, relative to the base directory:
//!
//! - `meta-rules-dat/geo/geosite/*.yaml` -> `geosite/*.list`
//! - `meta-rules-dat/geo/geoip/*.yaml` -> `geoip/*.list`
//! - `rule_hashes.json`: digest record
//! - `update_report.txt`: latest update report

mod error;
mod rule_kind;

pub mod change;
pub mod config;
pub mod converter;
pub mod hash_store;
pub mod output_dir;
pub mod pipeline;
pub mod report;
pub mod source;

// Re-export core types
pub use error::{Error, Result};
pub use rule_kind::RuleKind;

pub use change::{ChangeDetector, ChangeSet};
pub use config::{DigestCommit, PipelineConfig};
pub use converter::{ConvertMode, ProviderDocument, TransformSummary};
pub use hash_store::{DigestRecord, HashStore};
pub use pipeline::{RunOutcome, RunSummary};
