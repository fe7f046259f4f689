//! Model Training Binary
//!
//! Builds a labeled dataset from candle CSV files, fits a classifier and
//! persists it as a self-describing JSON record.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use signalgrid::application::training::train_model;
use signalgrid::config::PipelineConfig;
use signalgrid::domain::model::ModelKind;
use signalgrid::infrastructure::csv_candles::load_candles_csv;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Candle classifier trainer", long_about = None)]
struct Args {
    /// Candle CSV files, one per instrument (timestamp,open,high,low,close,volume)
    #[arg(long = "data", required = true)]
    data: Vec<PathBuf>,

    /// Path to output model file
    #[arg(long, default_value = "data/models/model.json")]
    output: PathBuf,

    /// Model variant (logistic, adaboost)
    #[arg(long, default_value = "adaboost")]
    model: String,

    /// Trailing candle window for feature extraction
    #[arg(long, default_value_t = 50)]
    window: usize,

    /// Label horizon in candles
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

    let config = PipelineConfig {
        window: args.window,
        horizon: args.horizon,
        label_threshold_pct: args.threshold_pct,
    };

    let mut series = Vec::with_capacity(args.data.len());
    for path in &args.data {
        let symbol = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let candles =
            load_candles_csv(path).with_context(|| format!("loading {}", path.display()))?;
        series.push((symbol, candles));
    }

    let model = train_model(&series, &config, kind, &args.output)?;
    info!(
        "Training complete: {} model written to {}",
        model.kind().as_str(),
        args.output.display()
    );
    Ok(())
}
