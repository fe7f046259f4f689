//! Reporting utilities for grid-search results.
//!
//! Provides formatted console output and JSON export capabilities.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::grid_search::{GridOutcome, GridResult, rank_results};
use crate::config::{GridConfig, PipelineConfig};
use crate::domain::backtest::RiskMode;
use crate::domain::model::ModelKind;

/// Reporter for grid-search output.
#[derive(Default)]
pub struct GridReporter;

impl GridReporter {
    pub fn print_header(&self, symbols: &[String], kind: ModelKind, pipeline: &PipelineConfig) {
        println!("{}", "=".repeat(80));
        println!("🔍 POLICY GRID SEARCH");
        println!("Run:      {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
        println!("Symbols:  {:?}", symbols);
        println!("Model:    {}", kind.as_str());
        println!(
            "Window:   {}  Horizon: {}  Label threshold: {:.2}%",
            pipeline.window, pipeline.horizon, pipeline.label_threshold_pct
        );
        println!("{}\n", "=".repeat(80));
    }

    pub fn print_grid_info(&self, grid: &GridConfig) {
        println!("📊 Parameter Grid:");
        println!("  Thresholds:     {:?}", grid.thresholds);
        println!("  Risk levels:    {:?}", grid.risks);
        println!(
            "  Risk mode:      {}",
            match grid.risk_mode {
                RiskMode::FixedUsd => "fixed USD",
                RiskMode::PercentEquity => "% of equity",
            }
        );
        println!("  Leverage:       {:.1}x", grid.leverage);
        println!(
            "  Frictions:      {:.1} bps fee, {:.1} bps slippage per side",
            grid.fee_bps, grid.slippage_bps
        );
        if let Some(stop) = grid.dd_stop_pct {
            println!("  Drawdown stop:  {:.1}%", stop);
        }
        println!("\n🔢 Total combinations to test: {}", grid.combinations());
    }

    /// Prints a formatted table of the top results.
    pub fn print_results_table(&self, results: &[GridResult], top_n: usize) {
        let ranked = rank_results(results, top_n);

        println!("\n{}", "=".repeat(80));
        println!("✅ GRID SEARCH COMPLETE - Top {} Results", ranked.len());
        println!("{}", "=".repeat(80));

        println!(
            "{:<4} | {:>6} | {:>6} | {:>7} | {:>8} | {:>10} | {:>7} | {:>8}",
            "#", "Thresh", "Risk", "Trades", "WinRate", "PnL", "MaxDD%", "Sharpe"
        );
        println!("{}", "-".repeat(80));

        for (i, result) in ranked.iter().enumerate() {
            println!(
                "{:<4} | {:>6.2} | {:>6.1} | {:>7} | {:>8.1} | {:>10.2} | {:>7.2} | {:>8.3}",
                i + 1,
                result.threshold,
                result.risk,
                result.metrics.trades,
                result.metrics.win_rate * 100.0,
                result.metrics.total_pnl,
                result.metrics.max_drawdown_pct,
                result.metrics.sharpe_like
            );
        }

        println!("{}\n", "=".repeat(80));
    }

    pub fn print_best(&self, best: &GridResult) {
        println!("🏆 BEST CONFIGURATION:");
        println!("  Threshold:      {:.2}", best.threshold);
        println!("  Risk:           {:.1}", best.risk);
        println!("  Trades:         {}", best.metrics.trades);
        println!("  Win rate:       {:.1}%", best.metrics.win_rate * 100.0);
        println!("  Total P&L:      {:.2}", best.metrics.total_pnl);
        println!("  Final equity:   {:.2}", best.metrics.final_equity);
        println!("  Return:         {:.2}%", best.metrics.return_pct);
        println!(
            "  Max drawdown:   {:.2} ({:.2}%)",
            best.metrics.max_drawdown, best.metrics.max_drawdown_pct
        );
        println!(
            "  Best/worst:     {:.2} / {:.2}",
            best.metrics.best_trade, best.metrics.worst_trade
        );
        println!("  Sharpe-like:    {:.3}", best.metrics.sharpe_like);
    }

    /// Exports the full outcome (best + every cell) as JSON.
    pub fn export_json(&self, outcome: &GridOutcome, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(outcome).context("serializing grid results")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing results to {}", path.display()))?;
        println!("📁 Results exported to {}", path.display());
        Ok(())
    }
}
