use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Outcome of one simulation run. Created fresh per run, never mutated
/// after completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub trades: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
    pub final_equity: f64,
    pub return_pct: f64,
    pub max_drawdown: f64,
    pub max_drawdown_pct: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    /// Mean trade P&L over its population standard deviation, scaled by
    /// sqrt(trade count). Not annualized.
    pub sharpe_like: f64,
}

/// Sharpe-like score of a P&L series; 0 when there are fewer than two
/// trades or the deviation is zero.
pub fn sharpe_like(pnls: &[f64]) -> f64 {
    if pnls.len() < 2 {
        return 0.0;
    }
    let mean = pnls.iter().copied().mean();
    let std = pnls.iter().copied().population_std_dev();
    if std == 0.0 {
        return 0.0;
    }
    (mean / std) * (pnls.len() as f64).sqrt()
}
