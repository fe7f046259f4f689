use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::model::sigmoid;

pub const DEFAULT_ROUNDS: usize = 60;

/// Upper bound on threshold candidates evaluated per feature and round.
const MAX_THRESHOLD_CANDIDATES: usize = 50;

/// One-feature, one-threshold decision rule with a signed vote weight.
///
/// `polarity` decides the comparison direction: +1 votes +1 when the
/// feature value is at or above the threshold, -1 inverts that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stump {
    pub feature_idx: usize,
    pub threshold: f64,
    pub polarity: i8,
    pub alpha: f64,
}

impl Stump {
    /// Raw vote in {-1, +1}, before alpha weighting.
    pub fn predict(&self, x: &[f64]) -> f64 {
        let sign = if x[self.feature_idx] >= self.threshold {
            1.0
        } else {
            -1.0
        };
        if self.polarity >= 0 { sign } else { -sign }
    }
}

/// AdaBoost ensemble of decision stumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaBoostModel {
    pub n_rounds: usize,
    pub stumps: Vec<Stump>,
}

impl AdaBoostModel {
    pub fn new(n_rounds: usize) -> Self {
        Self {
            n_rounds,
            stumps: Vec::new(),
        }
    }

    /// Sorted unique feature values, thinned to at most
    /// [`MAX_THRESHOLD_CANDIDATES`] evenly spaced ranks. Ascending order is
    /// preserved so the first-found tie break stays deterministic.
    fn candidate_thresholds(mut values: Vec<f64>) -> Vec<f64> {
        values.sort_by(f64::total_cmp);
        values.dedup();
        if values.len() <= MAX_THRESHOLD_CANDIDATES {
            return values;
        }
        (0..MAX_THRESHOLD_CANDIDATES)
            .map(|k| values[k * values.len() / MAX_THRESHOLD_CANDIDATES])
            .collect()
    }

    /// Exhaustive weighted-error search over (feature, threshold, polarity).
    /// Ties keep the first candidate in iteration order: feature index
    /// ascending, threshold ascending, polarity +1 before -1.
    fn best_stump(x: &[Vec<f64>], y_signed: &[f64], w: &[f64]) -> Option<(Stump, f64)> {
        let n_features = x.first().map(|row| row.len())?;
        let mut best: Option<(Stump, f64)> = None;

        for feature_idx in 0..n_features {
            let column: Vec<f64> = x.iter().map(|row| row[feature_idx]).collect();
            for threshold in Self::candidate_thresholds(column) {
                for polarity in [1i8, -1] {
                    let stump = Stump {
                        feature_idx,
                        threshold,
                        polarity,
                        alpha: 0.0,
                    };
                    let mut err = 0.0;
                    for (i, row) in x.iter().enumerate() {
                        if stump.predict(row) != y_signed[i] {
                            err += w[i];
                        }
                    }
                    if best.as_ref().is_none_or(|(_, best_err)| err < *best_err) {
                        best = Some((stump, err));
                    }
                }
            }
        }
        best
    }

    /// Boosting loop: up to `n_rounds` rounds, stopping early when no
    /// stump can be found (empty feature set).
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        let n = x.len();
        if n == 0 {
            return;
        }
        let y_signed: Vec<f64> = y.iter().map(|&l| if l == 1 { 1.0 } else { -1.0 }).collect();
        let mut w = vec![1.0 / n as f64; n];
        self.stumps.clear();

        for round in 0..self.n_rounds {
            let Some((mut stump, raw_err)) = Self::best_stump(x, &y_signed, &w) else {
                debug!("AdaBoost: no valid stump at round {}, stopping", round + 1);
                break;
            };

            // Clamp keeps alpha finite on perfectly (mis)classified rounds
            let err = raw_err.clamp(1e-9, 0.499_999);
            stump.alpha = 0.5 * ((1.0 - err) / err).ln();

            Self::reweight(&mut w, x, &y_signed, &stump);

            debug!(
                "AdaBoost: round {}/{} feature={} err={:.6} alpha={:.4}",
                round + 1,
                self.n_rounds,
                stump.feature_idx,
                err,
                stump.alpha
            );
            self.stumps.push(stump);
        }
    }

    /// Scales each example weight by `exp(-alpha * y * h(x))` and
    /// renormalizes to unit mass. Renormalization is skipped only if the
    /// total collapses to exactly 0, which the error clamp rules out.
    fn reweight(w: &mut [f64], x: &[Vec<f64>], y_signed: &[f64], stump: &Stump) {
        let mut total = 0.0;
        for (i, wi) in w.iter_mut().enumerate() {
            *wi *= (-stump.alpha * y_signed[i] * stump.predict(&x[i])).exp();
            total += *wi;
        }
        if total > 0.0 {
            for wi in w.iter_mut() {
                *wi /= total;
            }
        }
    }

    /// Weighted vote sum over the ensemble.
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        self.stumps.iter().map(|s| s.alpha * s.predict(x)).sum()
    }

    /// Squashes the decision function through the clamped sigmoid, so a
    /// pathological alpha accumulation cannot overflow.
    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        sigmoid(self.decision_function(x))
    }
}
