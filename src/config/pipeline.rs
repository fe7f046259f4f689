use serde::{Deserialize, Serialize};

/// Dataset construction settings shared by training and backtesting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Trailing candle window the feature extractor sees.
    pub window: usize,
    /// Candles ahead used for the label and the backtest exit.
    pub horizon: usize,
    /// Minimum future return, in percent, for a positive label.
    pub label_threshold_pct: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: 50,
            horizon: 12,
            label_threshold_pct: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.window, 50);
        assert_eq!(config.horizon, 12);
        assert_eq!(config.label_threshold_pct, 0.5);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: PipelineConfig = toml::from_str("window = 30").expect("parse");
        assert_eq!(config.window, 30);
        assert_eq!(config.horizon, 12);
    }
}
