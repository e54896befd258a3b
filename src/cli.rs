use anyhow::{Context, Result};
use clap::Parser;
use run_recorder::{Caller, Recorder, RecorderConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "run-recorder",
    version,
    about = "Record a run in a persistent JSON log"
)]
pub struct Cli {
    /// Backing store for the run counter and history
    #[arg(long, default_value = run_recorder::config::DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Path recorded as the caller for this run (defaults to this executable)
    #[arg(long)]
    pub caller: Option<PathBuf>,

    /// Print the recorded entry as JSON instead of the confirmation message
    #[arg(long)]
    pub json: bool,

    /// Suppress the confirmation message
    #[arg(long)]
    pub quiet: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Install the stderr diagnostics subscriber. `RUST_LOG` overrides the flag.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "run_recorder=debug"
    } else {
        "run_recorder=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build a `RecorderConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> RecorderConfig {
    RecorderConfig {
        log_path: args.log_file.clone(),
        announce: !(args.quiet || args.json),
    }
}

fn resolve_caller(args: &Cli) -> Result<Caller> {
    match args.caller.as_deref() {
        Some(p) => Ok(Caller::new(p)),
        None => Caller::current_exe(),
    }
}

/// Perform exactly one recording cycle.
pub fn run(args: Cli) -> Result<()> {
    let caller = resolve_caller(&args)?;
    let recorder = Recorder::new(build_config(&args));
    let entry = recorder.record(&caller)?;

    if args.json {
        let out = serde_json::to_string_pretty(&entry).context("serialize entry")?;
        let _ = writeln!(std::io::stdout().lock(), "{}", out);
    }
    Ok(())
}
