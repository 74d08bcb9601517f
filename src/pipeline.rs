//! End-to-end generation run.
//!
//! A run checks that the upstream dataset is present, reports which source
//! documents changed, regenerates every rule list from scratch and records
//! the new digests.

use chrono::Local;

use crate::change::{ChangeDetector, ChangeSet};
use crate::config::{DigestCommit, PipelineConfig};
use crate::converter::{transform_rules, TransformSummary};
use crate::hash_store::HashStore;
use crate::report::{self, TIMESTAMP_FORMAT};
use crate::{output_dir, Result, RuleKind};

/// Instruction printed when the dataset directory is missing.
pub const REMEDIATION: &str = "git submodule update --init --recursive";

/// What a completed run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Changes since the previous run
    pub changes: ChangeSet,
    /// Domain list generation result
    pub domain: TransformSummary,
    /// IP list generation result
    pub ip: TransformSummary,
}

/// Outcome of [`run`].
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The source root was absent; nothing was touched
    MissingSourceRoot,
    /// All steps ran
    Completed(RunSummary),
}

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Run the full pipeline once.
pub fn run(config: &PipelineConfig) -> Result<RunOutcome> {
    println!("Starting rule generation - {}", now());

    if !config.source_root.is_dir() {
        log::error!("Source directory {:?} does not exist", config.source_root);
        println!(
            "Error: rule dataset {:?} not found\nPlease run: {}",
            config.source_root, REMEDIATION
        );
        return Ok(RunOutcome::MissingSourceRoot);
    }

    println!("\nChecking for rule updates...");
    let detector = ChangeDetector::new(HashStore::new(&config.state_file));
    let (changes, record) = detector.detect(&config.source_dirs())?;
    let text = report::render(&changes, Local::now().naive_local());
    report::write(&text, &config.report_file)?;

    if config.digest_commit == DigestCommit::BeforeTransform {
        detector.commit(&record)?;
    }

    output_dir::reset(&config.output_dirs())?;

    let domain = transform_rules(
        RuleKind::Domain,
        config.source_dir(RuleKind::Domain),
        config.output_dir(RuleKind::Domain),
    )?;
    let ip = transform_rules(
        RuleKind::IpCidr,
        config.source_dir(RuleKind::IpCidr),
        config.output_dir(RuleKind::IpCidr),
    )?;

    if config.digest_commit == DigestCommit::AfterTransform {
        detector.commit(&record)?;
    }

    log::info!(
        "Generated {} domain lists ({} skipped) and {} IP lists ({} skipped)",
        domain.written.len(),
        domain.skipped.len(),
        ip.written.len(),
        ip.skipped.len()
    );
    println!("\nRule generation finished - {}", now());

    Ok(RunOutcome::Completed(RunSummary { changes, domain, ip }))
}
