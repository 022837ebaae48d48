//! Rolling sample standard deviation.
//!
//! STDDEV(n)[i] = sqrt(sum((R[i-j] - mean)^2 for j in 0..n) / (n - 1))
//! A window is defined only when all n inputs are defined, so an undefined
//! leading input (the anchor row of a return column) pushes the warmup one
//! row further out.

use crate::domain::stats;

pub fn rolling_stddev(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut window = Vec::with_capacity(period);

    for i in 0..values.len() {
        if period < 2 || i + 1 < period {
            out.push(None);
            continue;
        }

        window.clear();
        window.extend(values[i + 1 - period..=i].iter().flatten());
        out.push(if window.len() == period {
            stats::sample_stddev(&window)
        } else {
            None
        });
    }

    out
}
