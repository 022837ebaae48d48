//! Simple Moving Average.
//!
//! SMA(n)[i] = sum(V[i-j] for j in 0..n) / n
//! Warmup: first (n-1) rows are undefined.

use crate::domain::stats;

pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                stats::mean(&values[i + 1 - period..=i])
            }
        })
        .collect()
}
