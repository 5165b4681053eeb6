//! Runs the pattern demonstrations from the command line.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use design_patterns::catalog::{self, PatternKind};
use design_patterns::config::{CatalogConfig, SinkKind};
use design_patterns::sink::{ConsoleSink, LogSink, Sink};

/// Design patterns, one runnable demonstration each.
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about, long_about = None)]
struct Args {
    /// TOML or JSON file with `patterns`, `sink` and `color`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where output goes: console or log.
    #[arg(long)]
    sink: Option<SinkKind>,

    /// Disable coloured section headers.
    #[arg(long)]
    no_color: bool,

    /// Print the available pattern names and exit.
    #[arg(long)]
    list: bool,

    /// Patterns to run, in order. Defaults to every pattern.
    patterns: Vec<String>,
}

fn init_tracing(sink: SinkKind) {
    let default = match sink {
        SinkKind::Log => "info",
        SinkKind::Console => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<CatalogConfig> {
    let mut config = match &args.config {
        Some(path) => CatalogConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    config = config
        .with_pattern_names(&args.patterns)
        .context("Invalid pattern on the command line")?;
    if let Some(sink) = args.sink {
        config.sink = sink;
    }
    if args.no_color {
        config.color = false;
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    if args.list {
        for kind in PatternKind::ALL {
            println!("{:<18} {}", kind.name(), kind.title());
        }
        return Ok(());
    }

    let config = load_config(&args)?;
    init_tracing(config.sink);

    let sink: Arc<dyn Sink> = match config.sink {
        SinkKind::Console => Arc::new(ConsoleSink::new(config.color)),
        SinkKind::Log => Arc::new(LogSink),
    };
    catalog::run_all(&config.patterns, &sink).context("Demonstration failed")?;
    Ok(())
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        eprintln!("{} {err:#}", "error:".red().bold());
        process::exit(1);
    }
}
