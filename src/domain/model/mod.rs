pub mod logistic;
pub mod store;
pub mod stumps;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ModelError;

pub use logistic::LogisticModel;
pub use stumps::{AdaBoostModel, Stump};

/// Logistic squash clamped at |z| = 35 so extreme scores return exact
/// 0/1 instead of overflowing the exponential.
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z < -35.0 {
        return 0.0;
    }
    if z > 35.0 {
        return 1.0;
    }
    1.0 / (1.0 + (-z).exp())
}

/// A trained classifier, tagged by variant.
///
/// The serde tag doubles as the persisted schema version: the store
/// refuses records whose `type` it does not recognize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Model {
    #[serde(rename = "logistic")]
    Logistic(LogisticModel),
    #[serde(rename = "adaboost_stumps")]
    AdaBoostStumps(AdaBoostModel),
}

impl Model {
    /// Fits the variant in place with its default training schedule
    /// (10 shuffled epochs for logistic, `n_rounds` boosting rounds for
    /// the boosted ensemble).
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        match self {
            Model::Logistic(m) => m.fit(x, y, logistic::DEFAULT_EPOCHS, true),
            Model::AdaBoostStumps(m) => m.fit(x, y),
        }
    }

    /// Probability of the positive class, in [0, 1].
    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        match self {
            Model::Logistic(m) => m.predict_proba(x),
            Model::AdaBoostStumps(m) => m.predict_proba(x),
        }
    }

    /// Smallest feature-vector length this model can score.
    pub fn min_features(&self) -> usize {
        match self {
            Model::Logistic(m) => m.weights.len(),
            Model::AdaBoostStumps(m) => m
                .stumps
                .iter()
                .map(|s| s.feature_idx + 1)
                .max()
                .unwrap_or(0),
        }
    }

    /// Guards inference against a vector shorter than the trained width.
    pub fn check_dimension(&self, actual: usize) -> Result<(), ModelError> {
        let expected = self.min_features();
        if actual < expected {
            return Err(ModelError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Logistic(_) => ModelKind::Logistic,
            Model::AdaBoostStumps(_) => ModelKind::AdaboostStumps,
        }
    }
}

/// Classifier variant selector for CLIs and configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Logistic,
    AdaboostStumps,
}

impl ModelKind {
    /// Builds an untrained model of this variant with default
    /// hyperparameters.
    pub fn build(self, n_features: usize) -> Model {
        match self {
            ModelKind::Logistic => Model::Logistic(LogisticModel::with_defaults(n_features)),
            ModelKind::AdaboostStumps => {
                Model::AdaBoostStumps(AdaBoostModel::new(stumps::DEFAULT_ROUNDS))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Logistic => "logistic",
            ModelKind::AdaboostStumps => "adaboost_stumps",
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logistic" => Ok(ModelKind::Logistic),
            "adaboost" | "adaboost_stumps" | "stumps" => Ok(ModelKind::AdaboostStumps),
            other => Err(format!(
                "unknown model kind '{}' (expected 'logistic' or 'adaboost')",
                other
            )),
        }
    }
}
