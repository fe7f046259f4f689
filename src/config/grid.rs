use serde::{Deserialize, Serialize};

use crate::domain::backtest::{ExecutionParams, RiskMode};

/// Grid axes and execution frictions for policy search, loadable from a
/// TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Decision thresholds on the classifier probability.
    pub thresholds: Vec<f64>,
    /// Risk levels; USD or percent of equity depending on `risk_mode`.
    pub risks: Vec<f64>,
    pub risk_mode: RiskMode,
    pub leverage: f64,
    pub starting_balance: f64,
    pub fee_bps: f64,
    pub slippage_bps: f64,
    pub dd_stop_pct: Option<f64>,
    pub max_trades: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![0.5, 0.6, 0.7, 0.8],
            risks: vec![2.0, 4.0, 6.0, 8.0, 10.0],
            risk_mode: RiskMode::FixedUsd,
            leverage: 10.0,
            starting_balance: 1000.0,
            fee_bps: 6.0,
            slippage_bps: 2.0,
            dd_stop_pct: None,
            max_trades: None,
        }
    }
}

impl GridConfig {
    /// Execution parameters for one grid cell.
    pub fn execution_params(&self, risk: f64) -> ExecutionParams {
        ExecutionParams {
            risk,
            risk_mode: self.risk_mode,
            leverage: self.leverage,
            starting_balance: self.starting_balance,
            fee_bps: self.fee_bps,
            slippage_bps: self.slippage_bps,
            dd_stop_pct: self.dd_stop_pct,
            max_trades: self.max_trades,
        }
    }

    pub fn combinations(&self) -> usize {
        self.thresholds.len() * self.risks.len()
    }
}
