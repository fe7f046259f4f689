//! CSV candle ingestion.
//!
//! The market-data collaborator's sole obligation is a deterministic,
//! ascending-by-timestamp candle sequence; this loader enforces that
//! ordering at the boundary instead of trusting the file.

use std::path::Path;

use chrono::DateTime;
use serde::Deserialize;
use tracing::info;

use crate::domain::errors::DataError;
use crate::domain::market::Candle;

#[derive(Debug, Deserialize)]
struct CandleRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<CandleRow> for Candle {
    fn from(row: CandleRow) -> Self {
        Candle {
            timestamp: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

/// Loads an ascending candle series from a headered CSV file
/// (`timestamp,open,high,low,close,volume`, epoch seconds).
pub fn load_candles_csv(path: &Path) -> Result<Vec<Candle>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::CandleFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut candles: Vec<Candle> = Vec::new();
    for (row_idx, result) in reader.deserialize().enumerate() {
        let row: CandleRow = result.map_err(|e| DataError::CandleFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if let Some(prev) = candles.last()
            && prev.timestamp >= row.timestamp
        {
            return Err(DataError::NonMonotonicTimestamps {
                row: row_idx,
                prev_ts: prev.timestamp,
                ts: row.timestamp,
            });
        }
        candles.push(row.into());
    }

    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        let span_start = DateTime::from_timestamp(first.timestamp, 0).unwrap_or_default();
        let span_end = DateTime::from_timestamp(last.timestamp, 0).unwrap_or_default();
        info!(
            "Loaded {} candles from {} ({} .. {})",
            candles.len(),
            path.display(),
            span_start.format("%Y-%m-%d %H:%M"),
            span_end.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(candles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(name: &str, body: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("signalgrid_csv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "timestamp,open,high,low,close,volume").unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    #[test]
    fn test_load_valid_csv() {
        let path = write_csv(
            "ok.csv",
            "1700000000,100.0,101.0,99.0,100.5,12.0\n1700000060,100.5,102.0,100.0,101.5,8.0\n",
        );
        let candles = load_candles_csv(&path).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 100.5);
        assert_eq!(candles[1].timestamp, 1_700_000_060);
    }

    #[test]
    fn test_non_ascending_timestamps_rejected() {
        let path = write_csv(
            "bad_order.csv",
            "1700000060,100.0,101.0,99.0,100.5,12.0\n1700000000,100.5,102.0,100.0,101.5,8.0\n",
        );
        let err = load_candles_csv(&path).unwrap_err();
        assert!(matches!(err, DataError::NonMonotonicTimestamps { .. }));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_candles_csv(Path::new("/nonexistent/candles.csv")).unwrap_err();
        assert!(matches!(err, DataError::CandleFile { .. }));
    }
}
