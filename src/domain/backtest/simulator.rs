use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::backtest::metrics::{BacktestMetrics, sharpe_like};

/// How the per-trade risk figure is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMode {
    /// A fixed USD amount per trade.
    FixedUsd,
    /// A percentage of current equity, re-evaluated per trade. Sizing
    /// therefore compounds with the equity curve; this is intentional.
    PercentEquity,
}

/// Execution frictions and sizing for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    pub risk: f64,
    pub risk_mode: RiskMode,
    pub leverage: f64,
    pub starting_balance: f64,
    /// Fee per side, in basis points of stake.
    pub fee_bps: f64,
    /// Price friction per side, in basis points: entries fill above the
    /// close, exits below it.
    pub slippage_bps: f64,
    /// Halt the run once drawdown from peak equity reaches this percent.
    pub dd_stop_pct: Option<f64>,
    pub max_trades: Option<usize>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            risk: 10.0,
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

/// Replays classifier probabilities against realized future closes.
///
/// `probas` and `closes` are aligned index-for-index; a signal at `i`
/// enters at `closes[i]` and exits at `closes[i + horizon]`, both
/// adjusted for slippage. The run truncates (never fails) when the
/// horizon outruns the price series, the trade cap is hit, or the
/// drawdown stop triggers; the truncated record is still returned.
pub fn simulate(
    probas: &[f64],
    closes: &[f64],
    horizon: usize,
    threshold: f64,
    params: &ExecutionParams,
) -> BacktestMetrics {
    let slip_rate = params.slippage_bps / 10_000.0;
    let fee_rate = params.fee_bps / 10_000.0;

    let mut equity = params.starting_balance;
    let mut peak_equity = params.starting_balance;
    let mut max_drawdown = 0.0f64;
    let mut max_drawdown_pct = 0.0f64;
    let mut pnls: Vec<f64> = Vec::new();
    let mut wins = 0usize;

    for (i, &p) in probas.iter().enumerate() {
        if p < threshold {
            continue;
        }
        if let Some(cap) = params.max_trades
            && pnls.len() >= cap
        {
            debug!("Backtest: trade cap {} reached, stopping", cap);
            break;
        }
        if i + horizon >= closes.len() {
            break;
        }

        let entry = closes[i] * (1.0 + slip_rate);
        let exit = closes[i + horizon] * (1.0 - slip_rate);
        let ret = exit / entry - 1.0;

        let risk_amount = match params.risk_mode {
            RiskMode::FixedUsd => params.risk,
            RiskMode::PercentEquity => equity * params.risk / 100.0,
        };
        let stake = risk_amount * params.leverage;
        let fees = stake * fee_rate * 2.0;
        let trade_pnl = stake * ret - fees;

        equity += trade_pnl;
        pnls.push(trade_pnl);
        if trade_pnl > 0.0 {
            wins += 1;
        }

        peak_equity = peak_equity.max(equity);
        let drawdown = peak_equity - equity;
        let drawdown_pct = if peak_equity == 0.0 {
            0.0
        } else {
            drawdown / peak_equity * 100.0
        };
        max_drawdown = max_drawdown.max(drawdown);
        max_drawdown_pct = max_drawdown_pct.max(drawdown_pct);

        if let Some(stop) = params.dd_stop_pct
            && drawdown_pct >= stop
        {
            debug!(
                "Backtest: drawdown {:.2}% breached stop {:.2}% after {} trades, halting",
                drawdown_pct,
                stop,
                pnls.len()
            );
            break;
        }
    }

    let trades = pnls.len();
    let total_pnl = equity - params.starting_balance;
    let (best_trade, worst_trade) = if trades == 0 {
        (0.0, 0.0)
    } else {
        (
            pnls.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            pnls.iter().copied().fold(f64::INFINITY, f64::min),
        )
    };
    BacktestMetrics {
        trades,
        win_rate: if trades > 0 {
            wins as f64 / trades as f64
        } else {
            0.0
        },
        total_pnl,
        final_equity: equity,
        return_pct: if params.starting_balance == 0.0 {
            0.0
        } else {
            total_pnl / params.starting_balance * 100.0
        },
        max_drawdown,
        max_drawdown_pct,
        best_trade,
        worst_trade,
        sharpe_like: sharpe_like(&pnls),
    }
}
