//! Scalar summary statistics over a derived series.
//!
//! Fields that need more history than the series has are `None`. The two
//! exceptions are `sharpe_ratio` and `downside_deviation_pct`, which are 0
//! whenever their standard deviation is zero or undefined.

use crate::domain::config::MetricsConfig;
use crate::domain::derived::DerivedSeries;
use crate::domain::error::InvalidInputError;
use crate::domain::indicator::returns::MonthlyReturn;
use crate::domain::stats;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub current_price: f64,
    pub period_change_abs: f64,
    pub period_change_pct: f64,
    pub high_52w: f64,
    pub low_52w: f64,
    pub average_volume: f64,
    pub support_level: Option<f64>,
    pub resistance_level: Option<f64>,
    pub distance_from_support_pct: Option<f64>,
    pub distance_from_resistance_pct: Option<f64>,
    pub total_return_pct: Option<f64>,
    pub best_day_pct: Option<f64>,
    pub worst_day_pct: Option<f64>,
    pub average_daily_return_pct: Option<f64>,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: f64,
    pub daily_std_dev_pct: Option<f64>,
    pub downside_deviation_pct: f64,
    pub current_volatility_pct: Option<f64>,
    pub peak_volatility_pct: Option<f64>,
    pub monthly_returns: Vec<MonthlyReturn>,
}

impl SummaryStatistics {
    pub fn compute(
        derived: &DerivedSeries,
        config: &MetricsConfig,
    ) -> Result<Self, InvalidInputError> {
        let rows = &derived.rows;
        let (first, last) = match (rows.first(), rows.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(InvalidInputError::EmptySeries),
        };

        let current_price = last.bar.close;
        let period_change_abs = current_price - first.bar.close;
        let period_change_pct = period_change_abs / first.bar.close * 100.0;

        let year = stats::trailing(rows, config.year_window);
        let high_52w = year.iter().map(|r| r.bar.high).fold(f64::NEG_INFINITY, f64::max);
        let low_52w = year.iter().map(|r| r.bar.low).fold(f64::INFINITY, f64::min);

        let average_volume =
            rows.iter().map(|r| r.bar.volume as f64).sum::<f64>() / rows.len() as f64;

        let recent = stats::trailing(rows, config.support_resistance_window);
        let recent_lows: Vec<f64> = recent.iter().map(|r| r.bar.low).collect();
        let recent_highs: Vec<f64> = recent.iter().map(|r| r.bar.high).collect();
        let support_level = stats::percentile_linear(&recent_lows, config.support_percentile);
        let resistance_level =
            stats::percentile_linear(&recent_highs, config.resistance_percentile);
        let distance = |level: f64| (current_price / level - 1.0) * 100.0;

        let returns = derived.daily_returns();
        let stdev = stats::sample_stddev(&returns);
        let mean_return = stats::mean(&returns);
        let annualize = config.annualization_factor();

        let sharpe_ratio = match (mean_return, stdev) {
            (Some(m), Some(sd)) if sd > 0.0 => m / sd * annualize,
            _ => 0.0,
        };

        let negative: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
        let downside_deviation_pct = stats::sample_stddev(&negative)
            .map(|sd| sd * annualize * 100.0)
            .unwrap_or(0.0);

        let volatility: Vec<f64> = rows.iter().filter_map(|r| r.rolling_volatility).collect();

        Ok(Self {
            current_price,
            period_change_abs,
            period_change_pct,
            high_52w,
            low_52w,
            average_volume,
            support_level,
            resistance_level,
            distance_from_support_pct: support_level.map(distance),
            distance_from_resistance_pct: resistance_level.map(distance),
            total_return_pct: last.cumulative_return.map(|c| c * 100.0),
            best_day_pct: stats::max(&returns).map(|r| r * 100.0),
            worst_day_pct: stats::min(&returns).map(|r| r * 100.0),
            average_daily_return_pct: mean_return.map(|m| m * 100.0),
            max_drawdown_pct: rows.iter().map(|r| r.drawdown).fold(0.0, f64::min),
            sharpe_ratio,
            daily_std_dev_pct: stdev.map(|sd| sd * 100.0),
            downside_deviation_pct,
            current_volatility_pct: last.rolling_volatility,
            peak_volatility_pct: stats::max(&volatility),
            monthly_returns: derived.monthly_returns(),
        })
    }
}
