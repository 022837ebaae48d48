//! Descriptive statistics over plain slices.
//!
//! Variance uses the two-pass formula (mean first, then squared deviations)
//! with an n-1 denominator. Percentiles interpolate linearly between order
//! statistics: for sorted `x` of length n, `h = (n - 1) * p` and the result is
//! `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation; undefined below two observations.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// `p` in [0, 1].
pub fn percentile_linear(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// The last `n` items, or all of them when there are fewer.
pub fn trailing<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}
