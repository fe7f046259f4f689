use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed time interval.
///
/// A candle series is ordered ascending by timestamp. Gaps are tolerated,
/// not corrected: consumers must not assume constant spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}
