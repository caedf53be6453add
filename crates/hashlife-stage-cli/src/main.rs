//! hashlife-stage - frontend asset staging CLI
//!
//! Copies the wasm-pack output of `wasm-hashlife` into the frontend and
//! lists the frontend's example patterns. Run from the frontend directory
//! with no arguments after `wasm-pack build --release --target web`.
//!
//! ## Commands
//!
//! - (none) / `run`: stage both artifacts, then list examples
//! - `stage`: stage only
//! - `examples`: list examples only
//! - `verify`: check staged files against the build output

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hashlife_stage_core::{
    print_examples, stage_artifacts, verify_staged, StageConfig, StageReport,
};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "hashlife-stage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stage wasm-hashlife build artifacts into the frontend", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// wasm-pack output directory (default: ../wasm-hashlife/pkg)
    #[arg(long, global = true)]
    source_dir: Option<PathBuf>,

    /// Frontend directory receiving the artifacts (default: .)
    #[arg(long, global = true)]
    dest_dir: Option<PathBuf>,

    /// Examples directory to list (default: examples)
    #[arg(long, global = true)]
    examples_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage artifacts, then list examples
    Run,

    /// Stage artifacts only
    Stage {
        /// Print the staging report as JSON
        #[arg(long)]
        report: bool,
    },

    /// List example entries only
    Examples,

    /// Verify staged artifacts match the build output
    Verify,
}

impl Cli {
    fn resolve_config(&self) -> Result<StageConfig> {
        let mut config = StageConfig::load_or_default(self.config.as_deref())
            .context("Failed to load stage config")?;
        if let Some(dir) = &self.source_dir {
            config = config.with_source_dir(dir);
        }
        if let Some(dir) = &self.dest_dir {
            config = config.with_dest_dir(dir);
        }
        if let Some(dir) = &self.examples_dir {
            config = config.with_examples_dir(dir);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    hashlife_stage_core::init_tracing(cli.json, level);

    let config = cli.resolve_config()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&config, &mut out),
        Commands::Stage { report } => cmd_stage(&config, report, &mut out).map(|_| ()),
        Commands::Examples => cmd_examples(&config, &mut out),
        Commands::Verify => cmd_verify(&config, &mut out),
    }
}

/// Stage, then list examples
fn cmd_run(config: &StageConfig, out: &mut impl Write) -> Result<()> {
    cmd_stage(config, false, out)?;
    cmd_examples(config, out)
}

fn cmd_stage(config: &StageConfig, report: bool, out: &mut impl Write) -> Result<StageReport> {
    let staged = stage_artifacts(&config.artifacts, &config.source_dir, &config.dest_dir)
        .with_context(|| {
            format!(
                "Failed to stage artifacts from {:?} into {:?}",
                config.source_dir, config.dest_dir
            )
        })?;

    info!(
        artifacts = staged.artifacts.len(),
        total_bytes = staged.total_bytes(),
        "artifacts staged"
    );

    if report {
        let json = serde_json::to_string_pretty(&staged)?;
        writeln!(out, "{}", json)?;
    }

    Ok(staged)
}

fn cmd_examples(config: &StageConfig, out: &mut impl Write) -> Result<()> {
    let count = print_examples(&config.examples_dir, out)
        .with_context(|| format!("Failed to list examples in {:?}", config.examples_dir))?;
    info!(count, "examples listed");
    Ok(())
}

fn cmd_verify(config: &StageConfig, out: &mut impl Write) -> Result<()> {
    let verified = verify_staged(&config.artifacts, &config.source_dir, &config.dest_dir)
        .context("Staged artifacts do not match the build output")?;

    for artifact in &verified {
        writeln!(
            out,
            "{:<7} {} {} ({} bytes)",
            artifact.kind,
            artifact.digest.short(),
            artifact.dest.display(),
            artifact.bytes
        )?;
    }
    writeln!(out, "All {} staged artifacts up to date", verified.len())?;
    Ok(())
}
