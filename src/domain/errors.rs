use thiserror::Error;

/// Errors related to candle ingestion and dataset construction
#[derive(Debug, Error)]
pub enum DataError {
    #[error(
        "Empty dataset: {candles} candles cannot cover window {window} + horizon {horizon} + 1"
    )]
    EmptyDataset {
        candles: usize,
        window: usize,
        horizon: usize,
    },

    #[error("Candle series not ascending at row {row}: {prev_ts} >= {ts}")]
    NonMonotonicTimestamps { row: usize, prev_ts: i64, ts: i64 },

    #[error("Failed to read candle file {path}: {reason}")]
    CandleFile { path: String, reason: String },

    #[error(
        "No training data constructed across {symbols} symbol(s); increase lookback or check the candle source"
    )]
    NoTrainingData { symbols: usize },
}

/// Errors related to model training and persistence
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Malformed model record: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Failed to access model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Feature dimension mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,
}
