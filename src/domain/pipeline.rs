//! Metrics pipeline: validate a raw price series, derive per-row columns,
//! then summarize.
//!
//! The transform is pure. Nothing is returned unless the whole series
//! validates.

use crate::domain::config::MetricsConfig;
use crate::domain::derived::DerivedSeries;
use crate::domain::error::InvalidInputError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::summary::SummaryStatistics;
use std::thread;
use tracing::debug;

pub fn compute(
    series: &PriceSeries,
    config: &MetricsConfig,
) -> Result<(DerivedSeries, SummaryStatistics), InvalidInputError> {
    config.validate().map_err(InvalidInputError::from_config)?;
    series.validate()?;

    let derived = DerivedSeries::build(series, config);
    let summary = SummaryStatistics::compute(&derived, config)?;
    debug!(
        symbol = %series.symbol,
        rows = derived.len(),
        "computed metrics"
    );
    Ok((derived, summary))
}

/// One independent computation per instrument, results in input order.
pub fn compute_many(
    series: &[PriceSeries],
    config: &MetricsConfig,
) -> Vec<Result<(DerivedSeries, SummaryStatistics), InvalidInputError>> {
    thread::scope(|scope| {
        let handles: Vec<_> = series
            .iter()
            .map(|s| scope.spawn(move || compute(s, config)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}
