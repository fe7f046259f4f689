//! Grid Search Policy Optimizer Binary
//!
//! Trains a classifier on the 70% prefix of the combined dataset, then
//! scores every (threshold, risk) policy on the held-out suffix.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use signalgrid::application::grid_search::run_grid_search;
use signalgrid::application::reporting::GridReporter;
use signalgrid::config::{GridConfig, PipelineConfig};
use signalgrid::domain::model::ModelKind;
use signalgrid::infrastructure::csv_candles::load_candles_csv;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid Search Policy Optimizer", long_about = None)]
struct Args {
    /// Candle CSV files, one per instrument (timestamp,open,high,low,close,volume)
    #[arg(long = "data", required = true)]
    data: Vec<PathBuf>,

    /// Model variant (logistic, adaboost)
    #[arg(long, default_value = "adaboost")]
    model: String,

    /// TOML file with grid configuration
    #[arg(long)]
    grid_config: Option<PathBuf>,

    /// Output JSON file for results
    #[arg(short, long, default_value = "grid_results.json")]
    output: PathBuf,

    /// Number of top results to display
    #[arg(short, long, default_value_t = 10)]
    top_n: usize,

    /// Trailing candle window for feature extraction
    #[arg(long, default_value_t = 50)]
    window: usize,

    /// Label/backtest horizon in candles
    #[arg(long, default_value_t = 12)]
    horizon: usize,

    /// Label threshold in percent
    #[arg(long, default_value_t = 0.5)]
    threshold_pct: f64,
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let args = Args::parse();
    let kind = ModelKind::from_str(&args.model)
        .map_err(|e| anyhow::anyhow!(e))
        .context("parsing --model")?;

    let pipeline = PipelineConfig {
        window: args.window,
        horizon: args.horizon,
        label_threshold_pct: args.threshold_pct,
    };

    let grid = if let Some(config_file) = &args.grid_config {
        info!("Loading grid config from: {}", config_file.display());
        load_grid_from_toml(config_file)?
    } else {
        info!("Using default grid");
        GridConfig::default()
    };

    let mut series = Vec::with_capacity(args.data.len());
    let mut symbols = Vec::with_capacity(args.data.len());
    for path in &args.data {
        let symbol = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let candles =
            load_candles_csv(path).with_context(|| format!("loading {}", path.display()))?;
        symbols.push(symbol.clone());
        series.push((symbol, candles));
    }

    let reporter = GridReporter;
    reporter.print_header(&symbols, kind, &pipeline);
    reporter.print_grid_info(&grid);

    println!("\n🚀 Starting grid search...\n");
    let outcome = run_grid_search(&series, &pipeline, kind, &grid)?;

    reporter.print_results_table(&outcome.results, args.top_n);
    reporter.print_best(&outcome.best);
    reporter.export_json(&outcome, &args.output)?;

    println!("\n✅ Grid search complete!\n");
    Ok(())
}

/// Loads a grid configuration from a TOML file.
fn load_grid_from_toml(path: &PathBuf) -> Result<GridConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid config file: {}", path.display()))?;
    let grid: GridConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse grid config TOML: {}", path.display()))?;
    Ok(grid)
}
