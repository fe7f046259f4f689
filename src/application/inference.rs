//! Inference-time scoring: the single contract downstream decision logic
//! depends on is one probability in [0, 1] per instrument.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::features::compute_features;
use crate::domain::market::Candle;
use crate::domain::model::{Model, store};

/// Loads a persisted model record. A malformed or unrecognized record is
/// a surfaced error; there is no partial recovery.
pub fn load_model(path: &Path) -> Result<Model> {
    store::load(path).with_context(|| format!("loading model from {}", path.display()))
}

/// Scores the latest feature vector of `candles`.
///
/// The window shrinks to the available history, so early-history series
/// still produce a (degraded) score.
pub fn predict_score(model: &Model, candles: &[Candle], window: usize) -> Result<f64> {
    let features = compute_features(candles, window).to_vector();
    model
        .check_dimension(features.len())
        .context("scoring latest candles")?;
    Ok(model.predict_proba(&features))
}
