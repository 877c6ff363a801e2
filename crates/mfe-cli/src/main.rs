//! Meta-feature Extraction - Main Entry Point

use anyhow::Result;
use clap::Parser;
use mfe_cli::{
    describe_registry, init_logging, load_config, load_dataset, render_report, render_summarized,
};
use mfe_extractor::{Extractor, Summary};
use std::path::PathBuf;
use tracing::info;

/// Extract General meta-features from a JSON dataset.
#[derive(Parser, Debug)]
#[command(name = "mfe", version)]
#[command(about = "Compute General meta-features of a tabular dataset")]
struct Args {
    /// Dataset JSON file with `rows`, optional `types` and optional `labels`.
    #[arg(required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Configuration file (TOML, JSON, YAML...).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Features to compute (default: all).
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,

    /// Summary functions for sequence-valued features.
    #[arg(long = "summary", value_delimiter = ',')]
    summaries: Vec<Summary>,

    /// Print per-feature outcomes instead of summarized values.
    #[arg(long)]
    raw: bool,

    /// Evaluate features on the calling thread.
    #[arg(long)]
    sequential: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// List registered features and exit.
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    info!("=== mfe v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config.as_deref())?;
    if !args.features.is_empty() {
        config.features = args.features;
    }
    if !args.summaries.is_empty() {
        config.summaries = args.summaries;
    }
    if args.sequential {
        config.parallel = false;
    }

    let extractor = Extractor::new(config)?;

    if args.list {
        println!("{}", describe_registry(extractor.registry()));
        return Ok(());
    }

    let Some(input) = args.input else {
        anyhow::bail!("no input dataset given");
    };
    let dataset = load_dataset(&input)?;

    let output = if args.raw {
        render_report(&extractor.extract(&dataset), args.pretty)?
    } else {
        render_summarized(&extractor.extract_summarized(&dataset), args.pretty)?
    };
    println!("{}", output);

    Ok(())
}
