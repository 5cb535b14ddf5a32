use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use console::{Term, style};
use ship_core::{BuildContext, BuildOptions, BuildSummary};
use ship_platform::{Arch, Os};
use tracing_subscriber::EnvFilter;

/// shipwright - build, sign and package a butler release for one platform
#[derive(Parser)]
#[command(name = "ship")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target operating system: windows, linux or darwin (host-detected if omitted)
    #[arg(long, value_parser = Os::from_str)]
    os: Option<Os>,

    /// Target architecture: i686, x86_64 or arm64 (default: x86_64)
    #[arg(long, value_parser = Arch::from_str)]
    arch: Option<Arch>,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,

    /// Skip the code-signing stage entirely
    #[arg(long)]
    skip_signing: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = run(&cli) {
        let term = Term::stderr();
        let _ = term.write_line(&format!("{} {}", style("error:").red().bold(), e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let term = Term::stderr();

    let options = BuildOptions {
        os: cli.os,
        arch: cli.arch,
        skip_signing: cli.skip_signing,
    };

    let mut ctx = BuildContext::from_process()?;

    term.write_line(&format!(
        "{} Building butler release",
        style("::").cyan().bold()
    ))?;

    let summary = ship_core::run(&mut ctx, &options)?;
    print_summary(&term, &summary)?;

    Ok(())
}

fn print_summary(term: &Term, summary: &BuildSummary) -> Result<()> {
    term.write_line("")?;
    term.write_line(&format!("{} Build complete!", style("::").green().bold()))?;
    term.write_line(&format!("  Target:   {}", summary.target.artifact_dir_key()))?;
    term.write_line(&format!("  Version:  {}", summary.version.version))?;
    if !summary.version.commit.is_empty() {
        term.write_line(&format!("  Commit:   {}", summary.version.commit))?;
    }
    term.write_line(&format!("  Artifact: {}", summary.artifact.display()))?;
    Ok(())
}
