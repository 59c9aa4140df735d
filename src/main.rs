//! colflow - paginate titles and paragraphs into column frames
//!
//! Runs the placement engine against the built-in simulated host and writes
//! the resulting frame plan as JSON.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colflow::{paginate, ColumnMode, Content, LayoutConfig, SimulatedHost};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "colflow")]
#[command(version, about = "Lay out sections of text into column frames", long_about = None)]
struct Args {
    /// Content JSON: {"sections": [{"title": ..., "paragraphs": [...]}]}
    content: PathBuf,

    /// Layout configuration JSON; missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of columns (1 or 2), overriding the configuration
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    columns: Option<u8>,

    /// Write the plan here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the plan
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Use debug logging level
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<LayoutConfig> {
    let mut config = match &args.config {
        Some(path) => LayoutConfig::from_path(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => LayoutConfig::two_column(),
    };

    if let Some(mode) = args.columns.and_then(ColumnMode::from_count) {
        if args.config.is_none() && mode == ColumnMode::Single {
            config = LayoutConfig::single_column();
        } else {
            config.mode = mode;
        }
        config.validate().context("configuration after --columns")?;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = load_config(&args)?;
    let content = Content::from_path(&args.content)
        .with_context(|| format!("reading content {}", args.content.display()))?;
    info!(
        sections = content.section_count(),
        mode = ?config.mode,
        "loaded content"
    );

    let mut host = SimulatedHost::default();
    let plan = paginate(&mut host, config, &content).context("layout failed")?;

    let json = if args.pretty {
        plan.to_json_pretty()?
    } else {
        plan.to_json()?
    };

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            writeln!(out, "{}", json)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", json)?;
        }
    }

    info!("{}", plan.summary());
    Ok(())
}
