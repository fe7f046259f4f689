//! Rolling indicator primitives over close-price windows.
//!
//! Degenerate inputs (short windows, zero mean, zero loss) resolve to
//! documented guard values instead of dividing by zero. Callers rely on
//! these guards; do not "fix" them into errors.

use statrs::statistics::Statistics;

/// Arithmetic mean of the last `period` values.
///
/// Falls back to the mean of all values when fewer than `period` exist,
/// and to 0.0 for an empty slice.
pub fn sma(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    if values.len() < period || period == 0 {
        return values.iter().copied().mean();
    }
    values[values.len() - period..].iter().copied().mean()
}

/// Exponential moving average seeded with the first value of the slice.
///
/// `period <= 1` degenerates to the last value.
pub fn ema(values: &[f64], period: usize) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    if period <= 1 {
        return values[values.len() - 1];
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema_val = first;
    for &v in &values[1..] {
        ema_val = v * k + ema_val * (1.0 - k);
    }
    ema_val
}

/// Relative strength index over the last `period` deltas.
///
/// Neutral 50.0 when fewer than `period + 1` values exist; 100.0 when the
/// window has no losses.
pub fn rsi(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period + 1 {
        return 50.0;
    }
    let mut gains = 0.0;
    let mut losses = 0.0;
    let n = values.len();
    for i in (n - period)..n {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }
    if losses == 0.0 {
        return 100.0;
    }
    let rs = (gains / period as f64) / (losses / period as f64);
    100.0 - (100.0 / (1.0 + rs))
}

/// Coefficient of variation: population standard deviation of the last
/// `period` values divided by their mean. 0.0 when the window has at most
/// one element or a zero mean.
pub fn volatility(values: &[f64], period: usize) -> f64 {
    let period = period.min(values.len());
    if period <= 1 {
        return 0.0;
    }
    let window = &values[values.len() - period..];
    let mean = window.iter().copied().mean();
    if mean == 0.0 {
        return 0.0;
    }
    window.iter().copied().population_std_dev() / mean
}
