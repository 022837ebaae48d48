//! Running maximum and percentage drawdown from it.
//!
//! MAX[i] = max(C[0..=i])
//! DD[i] = (C[i] - MAX[i]) / MAX[i] * 100, always <= 0.

pub fn running_max(closes: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    closes
        .iter()
        .map(|&c| {
            peak = peak.max(c);
            peak
        })
        .collect()
}

pub fn drawdown(closes: &[f64], running_max: &[f64]) -> Vec<f64> {
    closes
        .iter()
        .zip(running_max)
        .map(|(&c, &peak)| (c - peak) / peak * 100.0)
        .collect()
}
