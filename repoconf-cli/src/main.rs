//! repoconf: keep GitHub repository settings in line with a config file.
//!
//! # Usage
//!
//! ```text
//! repoconf [--config <path>]
//! repoconf --version
//! ```
//!
//! Without `--config`, `.repo-config.yml` or `.repo-config.yaml` in the
//! current directory is used. The token comes from `.gh-token`, `GH_TOKEN`
//! or `GITHUB_TOKEN`.

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use repoconf_sync::pipeline;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "repoconf",
    version,
    about = "Change settings on your own and/or org repos if they differ from those in .repo-config.yml",
    long_about = None,
    disable_version_flag = true,
)]
struct Cli {
    /// Path to a custom config file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    if let Some(path) = &cli.config {
        tracing::debug!("using config override {}", path.display());
    }

    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let summary = pipeline::run(&cwd, cli.config.as_deref(), report::print_event)
        .context("reconciliation failed")?;

    // Failed patches are reported per repository; the run itself still completed.
    report::print_summary(&summary);
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
