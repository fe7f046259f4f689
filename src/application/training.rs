use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::PipelineConfig;
use crate::domain::dataset::{Dataset, build_dataset};
use crate::domain::errors::DataError;
use crate::domain::features::FEATURE_NAMES;
use crate::domain::market::Candle;
use crate::domain::model::{Model, ModelKind, store};

/// Builds one dataset per instrument and concatenates them in input
/// order. An empty result is a configuration error, not a valid dataset.
pub fn build_combined_dataset(
    series: &[(String, Vec<Candle>)],
    config: &PipelineConfig,
) -> Result<Dataset, DataError> {
    let mut combined = Dataset::default();
    for (symbol, candles) in series {
        let dataset = build_dataset(
            candles,
            config.window,
            config.horizon,
            config.label_threshold_pct,
        );
        info!(
            "Dataset: {} -> {} examples ({} candles)",
            symbol,
            dataset.len(),
            candles.len()
        );
        combined.extend(dataset);
    }
    if combined.is_empty() {
        return Err(DataError::NoTrainingData {
            symbols: series.len(),
        });
    }
    Ok(combined)
}

/// Trains a classifier of `kind` on the full combined dataset and
/// persists it to `model_path`. Returns the trained model.
pub fn train_model(
    series: &[(String, Vec<Candle>)],
    config: &PipelineConfig,
    kind: ModelKind,
    model_path: &Path,
) -> Result<Model> {
    let dataset = build_combined_dataset(series, config).context("building training dataset")?;

    let positives = dataset.labels.iter().filter(|&&l| l == 1).count();
    info!(
        "Training {} on {} examples ({} positive, {:.1}%)",
        kind.as_str(),
        dataset.len(),
        positives,
        positives as f64 / dataset.len() as f64 * 100.0
    );

    let mut model = kind.build(FEATURE_NAMES.len());
    model.fit(&dataset.features, &dataset.labels);

    store::save(&model, model_path).context("persisting trained model")?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let p = 100.0 + i as f64;
                Candle::new(i as i64 * 60, p, p + 0.5, p - 0.5, p, 10.0)
            })
            .collect()
    }

    #[test]
    fn test_combined_dataset_concatenates_symbols() {
        let series = vec![
            ("AAA".to_string(), rising_candles(60)),
            ("BBB".to_string(), rising_candles(80)),
        ];
        let config = PipelineConfig {
            window: 20,
            horizon: 5,
            label_threshold_pct: 0.1,
        };
        let combined = build_combined_dataset(&series, &config).unwrap();
        assert_eq!(combined.len(), (60 - 25) + (80 - 25));
    }

    #[test]
    fn test_empty_combined_dataset_is_fatal() {
        let series = vec![("AAA".to_string(), rising_candles(10))];
        let config = PipelineConfig::default();
        let err = build_combined_dataset(&series, &config).unwrap_err();
        assert!(matches!(err, DataError::NoTrainingData { symbols: 1 }));
    }

    #[test]
    fn test_train_model_persists_loadable_record() {
        let dir = std::env::temp_dir().join("signalgrid_training_test");
        let path = dir.join("model.json");
        let series = vec![("AAA".to_string(), rising_candles(120))];
        let config = PipelineConfig {
            window: 20,
            horizon: 5,
            label_threshold_pct: 0.1,
        };

        let model = train_model(&series, &config, ModelKind::Logistic, &path).unwrap();
        let loaded = store::load(&path).unwrap();
        assert_eq!(model, loaded);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
