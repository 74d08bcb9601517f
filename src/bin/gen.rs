//! geolist-gen: CLI tool for generating Clash rule lists from geosite/geoip YAML providers.

use clap::{Parser, Subcommand};
use geolist::converter::{convert_provider, ConvertMode};
use geolist::{pipeline, DigestCommit, PipelineConfig, RunOutcome};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geolist-gen")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Generate Clash rule lists from geosite/geoip YAML providers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Directory the default layout is resolved against (default: working directory)
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Rule dataset root (default: <base-dir>/meta-rules-dat)
    #[arg(long)]
    source_root: Option<PathBuf>,

    /// Digest record file (default: <base-dir>/rule_hashes.json)
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Update report file (default: <base-dir>/update_report.txt)
    #[arg(long)]
    report_file: Option<PathBuf>,

    /// When to persist digests: after-transform or before-transform
    #[arg(long, default_value = "after-transform")]
    commit_digests: DigestCommit,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate all rule lists (default)
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Convert a single provider YAML file to rule text
    Convert {
        /// Input provider YAML file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit classical TYPE,value rules instead of raw entries
        #[arg(short, long)]
        classical: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        None => generate(cli.generate),
        Some(Commands::Generate { args }) => generate(args),
        Some(Commands::Convert {
            input,
            output,
            classical,
        }) => convert_file(&input, output.as_ref(), classical),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match args.base_dir {
        Some(base) => PipelineConfig::with_base(base),
        None => PipelineConfig::default(),
    }
    .with_digest_commit(args.commit_digests);
    if let Some(root) = args.source_root {
        config = config.with_source_root(root);
    }
    if let Some(path) = args.state_file {
        config = config.with_state_file(path);
    }
    if let Some(path) = args.report_file {
        config = config.with_report_file(path);
    }

    match pipeline::run(&config)? {
        RunOutcome::MissingSourceRoot => {
            log::warn!("Nothing generated");
        }
        RunOutcome::Completed(summary) => {
            log::debug!(
                "{} changes, {} domain rules, {} IP rules",
                summary.changes.len(),
                summary.domain.rules,
                summary.ip.rules
            );
        }
    }
    Ok(())
}

fn convert_file(
    input: &PathBuf,
    output: Option<&PathBuf>,
    classical: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = if classical {
        ConvertMode::Classical
    } else {
        ConvertMode::Plain
    };

    let content = fs::read_to_string(input)?;
    let rules = convert_provider(&content, mode)?;

    match output {
        Some(path) => {
            fs::write(path, &rules)?;
            println!("Successfully converted {:?} -> {:?}", input, path);
        }
        None => println!("{}", rules),
    }
    Ok(())
}
