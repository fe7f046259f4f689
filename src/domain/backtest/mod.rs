pub mod metrics;
pub mod simulator;

pub use metrics::BacktestMetrics;
pub use simulator::{ExecutionParams, RiskMode, simulate};
