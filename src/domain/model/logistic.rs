use serde::{Deserialize, Serialize};

use crate::domain::model::sigmoid;

pub const DEFAULT_LR: f64 = 0.05;
pub const DEFAULT_L2: f64 = 1e-4;
pub const DEFAULT_EPOCHS: usize = 10;

fn default_lr() -> f64 {
    DEFAULT_LR
}

fn default_l2() -> f64 {
    DEFAULT_L2
}

/// Fractional part of the golden ratio, the multiplier of the
/// deterministic index permutation used during training.
const GOLDEN_RATIO_FRAC: f64 = 0.618_033_988_749_894_9;

/// Logistic regression trained by per-example stochastic gradient descent.
///
/// Training is bit-reproducible: example order is permuted by a
/// golden-ratio index walk instead of a seeded RNG, so two fits on the
/// same data produce identical weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub bias: f64,
    #[serde(default = "default_lr")]
    pub lr: f64,
    #[serde(default = "default_l2")]
    pub l2: f64,
}

impl LogisticModel {
    pub fn new(n_features: usize, lr: f64, l2: f64) -> Self {
        Self {
            weights: vec![0.0; n_features],
            bias: 0.0,
            lr,
            l2,
        }
    }

    pub fn with_defaults(n_features: usize) -> Self {
        Self::new(n_features, DEFAULT_LR, DEFAULT_L2)
    }

    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        let mut z = self.bias;
        for (w, xi) in self.weights.iter().zip(x.iter()) {
            z += w * xi;
        }
        sigmoid(z)
    }

    /// One pass of the deterministic pseudo-shuffle over `idxs`.
    ///
    /// Fisher-Yates with the swap target derived from the golden ratio
    /// rather than drawn randomly; identical input length gives the same
    /// permutation on every run.
    fn pseudo_shuffle(idxs: &mut [usize]) {
        for i in (1..idxs.len()).rev() {
            let j = ((i + 1) as f64 * GOLDEN_RATIO_FRAC) as usize % (i + 1);
            idxs.swap(i, j);
        }
    }

    /// Online gradient descent with L2 on the weights; the bias gradient
    /// is left unregularized.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8], epochs: usize, shuffle: bool) {
        let n = x.len();
        if n == 0 {
            return;
        }
        let mut idxs: Vec<usize> = (0..n).collect();
        for _ in 0..epochs {
            if shuffle {
                Self::pseudo_shuffle(&mut idxs);
            }
            for &i in &idxs {
                let xi = &x[i];
                let p = self.predict_proba(xi);
                let err = p - f64::from(y[i]);
                for k in 0..self.weights.len() {
                    let grad = err * xi[k] + self.l2 * self.weights[k];
                    self.weights[k] -= self.lr * grad;
                }
                self.bias -= self.lr * err;
            }
        }
    }
}
