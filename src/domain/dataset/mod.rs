use tracing::debug;

use crate::domain::features::compute_features;
use crate::domain::market::Candle;

/// Supervised examples built from one candle history.
///
/// `features`, `labels` and `entry_closes` are parallel, one entry per
/// eligible index, in time order. Chronological order is load-bearing:
/// downstream train/test splitting is a prefix/suffix cut, and shuffling
/// here would leak future candles into training.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
    /// Close price at each example's index, the entry price a backtest
    /// would trade at.
    pub entry_closes: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Appends another dataset (multi-instrument concatenation).
    pub fn extend(&mut self, other: Dataset) {
        self.features.extend(other.features);
        self.labels.extend(other.labels);
        self.entry_closes.extend(other.entry_closes);
    }
}

/// Slides the feature extractor over `candles` producing one example per
/// index `i` in `[window, len - horizon - 1]`.
///
/// Features are computed over `candles[..i]` (the "as of time i" view),
/// the label is 1 iff `close[i + horizon] / close[i] - 1 >= threshold_pct / 100`.
/// Too-short input yields an empty dataset; callers decide whether that
/// is fatal.
pub fn build_dataset(
    candles: &[Candle],
    window: usize,
    horizon: usize,
    threshold_pct: f64,
) -> Dataset {
    let n = candles.len();
    let mut dataset = Dataset::default();
    if n < window + horizon + 1 {
        debug!(
            candles = n,
            window, horizon, "history too short, returning empty dataset"
        );
        return dataset;
    }

    let threshold = threshold_pct / 100.0;
    for i in window..(n - horizon) {
        let fs = compute_features(&candles[..i], window);
        let future_ret = candles[i + horizon].close / candles[i].close - 1.0;
        dataset.features.push(fs.to_vector());
        dataset.labels.push(u8::from(future_ret >= threshold));
        dataset.entry_closes.push(candles[i].close);
    }
    dataset
}
