use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::training::build_combined_dataset;
use crate::config::{GridConfig, PipelineConfig};
use crate::domain::backtest::{BacktestMetrics, simulate};
use crate::domain::features::FEATURE_NAMES;
use crate::domain::market::Candle;
use crate::domain::model::ModelKind;

/// Share of the combined dataset used for training; the remainder is the
/// held-out evaluation suffix. The cut is chronological, never shuffled.
const TRAIN_SPLIT: f64 = 0.7;

/// Metrics for one (threshold, risk) grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResult {
    pub threshold: f64,
    pub risk: f64,
    #[serde(flatten)]
    pub metrics: BacktestMetrics,
}

/// Full grid-search output: every evaluated cell plus the winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridOutcome {
    pub best: GridResult,
    pub results: Vec<GridResult>,
    /// Held-out examples the probabilities were scored on.
    pub test_examples: usize,
}

/// Trains one classifier on the 70% prefix of the combined dataset and
/// scores every (threshold, risk) pair on the 30% suffix.
///
/// The best cell is the strictly greatest Sharpe-like score; on ties the
/// first-found wins (comparison is `>`, not `>=`).
pub fn run_grid_search(
    series: &[(String, Vec<Candle>)],
    pipeline: &PipelineConfig,
    kind: ModelKind,
    grid: &GridConfig,
) -> Result<GridOutcome> {
    let dataset = build_combined_dataset(series, pipeline).context("building backtest dataset")?;

    let split = (dataset.len() as f64 * TRAIN_SPLIT) as usize;
    let (x_train, x_test) = dataset.features.split_at(split);
    let (y_train, _y_test) = dataset.labels.split_at(split);
    let closes_test = &dataset.entry_closes[split..];

    info!(
        "GridSearch: {} train / {} test examples, model={}",
        split,
        x_test.len(),
        kind.as_str()
    );

    let mut model = kind.build(FEATURE_NAMES.len());
    model.fit(x_train, y_train);

    let probas: Vec<f64> = x_test.iter().map(|x| model.predict_proba(x)).collect();

    let (best, results) = score_grid(&probas, closes_test, pipeline.horizon, grid)?;
    info!(
        "GridSearch: best threshold={:.2}, risk={:.1}, sharpe={:.3}",
        best.threshold, best.risk, best.metrics.sharpe_like
    );

    Ok(GridOutcome {
        best,
        results,
        test_examples: x_test.len(),
    })
}

/// Simulates every grid cell against one probability/price alignment and
/// picks the winner by strictly greatest Sharpe-like score.
pub fn score_grid(
    probas: &[f64],
    closes: &[f64],
    horizon: usize,
    grid: &GridConfig,
) -> Result<(GridResult, Vec<GridResult>)> {
    let total = grid.combinations();
    let mut results = Vec::with_capacity(total);
    let mut best: Option<GridResult> = None;

    for &threshold in &grid.thresholds {
        for &risk in &grid.risks {
            let metrics = simulate(
                probas,
                closes,
                horizon,
                threshold,
                &grid.execution_params(risk),
            );
            info!(
                "GridSearch: combination {}/{} (threshold={:.2}, risk={:.1}) -> trades={}, sharpe={:.3}",
                results.len() + 1,
                total,
                threshold,
                risk,
                metrics.trades,
                metrics.sharpe_like
            );

            let record = GridResult {
                threshold,
                risk,
                metrics,
            };
            let improves = match &best {
                Some(current) => record.metrics.sharpe_like > current.metrics.sharpe_like,
                None => true,
            };
            if improves {
                best = Some(record.clone());
            }
            results.push(record);
        }
    }

    let best = best.context("grid configuration contains no (threshold, risk) combinations")?;
    Ok((best, results))
}

/// Top `n` results by Sharpe-like score, for display.
pub fn rank_results(results: &[GridResult], top_n: usize) -> Vec<GridResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| {
        b.metrics
            .sharpe_like
            .partial_cmp(&a.metrics.sharpe_like)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sawtooth_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let p = 100.0 + (i % 7) as f64 - if i % 3 == 0 { 2.0 } else { 0.0 };
                Candle::new(i as i64 * 60, p, p + 1.0, p - 1.0, p, 10.0 + (i % 5) as f64)
            })
            .collect()
    }

    #[test]
    fn test_empty_dataset_fails() {
        let series = vec![("AAA".to_string(), sawtooth_candles(10))];
        let result = run_grid_search(
            &series,
            &PipelineConfig::default(),
            ModelKind::Logistic,
            &GridConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_covers_whole_grid() {
        let series = vec![("AAA".to_string(), sawtooth_candles(300))];
        let pipeline = PipelineConfig {
            window: 20,
            horizon: 5,
            label_threshold_pct: 0.2,
        };
        let grid = GridConfig {
            thresholds: vec![0.4, 0.6],
            risks: vec![5.0, 10.0, 20.0],
            ..GridConfig::default()
        };

        let outcome = run_grid_search(&series, &pipeline, ModelKind::AdaboostStumps, &grid)
            .expect("grid search");
        assert_eq!(outcome.results.len(), 6);
        // Best is drawn from the evaluated cells
        assert!(outcome.results.contains(&outcome.best));
        // No cell strictly beats the chosen best
        assert!(
            outcome
                .results
                .iter()
                .all(|r| r.metrics.sharpe_like <= outcome.best.metrics.sharpe_like)
        );
    }

    #[test]
    fn test_tie_keeps_first_found() {
        // A threshold above every probability yields zero trades for all
        // cells, so every sharpe is 0 and the first cell must win.
        let series = vec![("AAA".to_string(), sawtooth_candles(200))];
        let pipeline = PipelineConfig {
            window: 20,
            horizon: 5,
            label_threshold_pct: 50.0,
        };
        let grid = GridConfig {
            thresholds: vec![1.1],
            risks: vec![2.0, 4.0, 8.0],
            ..GridConfig::default()
        };

        let outcome =
            run_grid_search(&series, &pipeline, ModelKind::Logistic, &grid).expect("grid search");
        assert_eq!(outcome.best.risk, 2.0);
        assert_eq!(outcome.best.metrics.trades, 0);
    }

    #[test]
    fn test_rank_results_orders_by_sharpe() {
        let mk = |sharpe: f64| GridResult {
            threshold: 0.5,
            risk: 1.0,
            metrics: BacktestMetrics {
                sharpe_like: sharpe,
                ..BacktestMetrics::default()
            },
        };
        let ranked = rank_results(&[mk(0.2), mk(1.5), mk(-0.3)], 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].metrics.sharpe_like, 1.5);
        assert_eq!(ranked[1].metrics.sharpe_like, 0.2);
    }
}
