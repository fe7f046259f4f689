use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::domain::features::indicators::{ema, rsi, sma, volatility};
use crate::domain::market::Candle;

/// Ordered list of feature names.
/// This order MUST match exactly the vector produced by [`FeatureSet::to_vector`].
/// Model weights and stump feature indices are positional, so any change
/// here is a breaking change for persisted models and requires retraining.
pub const FEATURE_NAMES: &[&str] = &[
    "last_close",
    "sma_10",
    "sma_20",
    "ema_10",
    "ema_20",
    "rsi_14",
    "vol_20",
    "range_pos",
    "volume_ratio",
    "momentum_1",
    "momentum_5",
];

/// Per-step feature snapshot derived from a trailing candle window.
///
/// Fields are named so that a reordering is a visible code change; the
/// positional contract lives solely in [`FeatureSet::to_vector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub last_close: f64,
    pub sma_10: f64,
    pub sma_20: f64,
    pub ema_10: f64,
    pub ema_20: f64,
    pub rsi_14: f64,
    pub vol_20: f64,
    /// Position of the last close inside the window's high/low range, in [0, 1].
    pub range_pos: f64,
    /// Last volume relative to the window's mean volume.
    pub volume_ratio: f64,
    pub momentum_1: f64,
    pub momentum_5: f64,
}

impl Default for FeatureSet {
    /// Neutral snapshot: the guard values every indicator degrades to on
    /// an empty window.
    fn default() -> Self {
        Self {
            last_close: 0.0,
            sma_10: 0.0,
            sma_20: 0.0,
            ema_10: 0.0,
            ema_20: 0.0,
            rsi_14: 50.0,
            vol_20: 0.0,
            range_pos: 0.5,
            volume_ratio: 1.0,
            momentum_1: 0.0,
            momentum_5: 0.0,
        }
    }
}

impl FeatureSet {
    /// Canonical ordering function. Parallel to [`FEATURE_NAMES`].
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.last_close,
            self.sma_10,
            self.sma_20,
            self.ema_10,
            self.ema_20,
            self.rsi_14,
            self.vol_20,
            self.range_pos,
            self.volume_ratio,
            self.momentum_1,
            self.momentum_5,
        ]
    }
}

/// Computes the feature snapshot for the trailing `window` candles.
///
/// When the series is shorter than `window`, the window silently shrinks
/// to the series length so early-history inference still produces a
/// (degraded) vector of the same fixed width.
pub fn compute_features(candles: &[Candle], window: usize) -> FeatureSet {
    if candles.is_empty() {
        return FeatureSet::default();
    }

    let window = window.min(candles.len());
    let recent = &candles[candles.len() - window..];

    let closes: Vec<f64> = recent.iter().map(|c| c.close).collect();
    let volumes: Vec<f64> = recent.iter().map(|c| c.volume).collect();

    let sma_10 = sma(&closes, 10.min(window));
    let sma_20 = sma(&closes, 20.min(window));

    let ema_slice = &closes[closes.len() - 50.min(window)..];
    let ema_10 = ema(ema_slice, 10.min(window));
    let ema_20 = ema(ema_slice, 20.min(window));

    let rsi_14 = rsi(&closes, 14);

    let vol_20 = volatility(&closes, 20.min(window));

    let last_close = closes[closes.len() - 1];
    let rng_high = recent.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let rng_low = recent.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    let range_pos = if rng_high == rng_low {
        0.5
    } else {
        (last_close - rng_low) / (rng_high - rng_low)
    };

    let vol_last = volumes[volumes.len() - 1];
    let vol_mean = volumes.iter().copied().mean();
    let volume_ratio = if vol_mean == 0.0 {
        1.0
    } else {
        vol_last / vol_mean
    };

    let momentum_1 = if closes.len() >= 2 {
        closes[closes.len() - 1] / closes[closes.len() - 2] - 1.0
    } else {
        0.0
    };
    let momentum_5 = if closes.len() >= 6 {
        closes[closes.len() - 1] / closes[closes.len() - 6] - 1.0
    } else {
        0.0
    };

    FeatureSet {
        last_close,
        sma_10,
        sma_20,
        ema_10,
        ema_20,
        rsi_14,
        vol_20,
        range_pos,
        volume_ratio,
        momentum_1,
        momentum_5,
    }
}
