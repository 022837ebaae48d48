//! Run configuration: where price data comes from and how metrics are
//! parameterised.

use crate::domain::error::TickerlensError;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Window sizes and constants for the metrics pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsConfig {
    /// Trailing returns in each rolling volatility window.
    pub volatility_window: usize,
    pub moving_average_windows: Vec<usize>,
    pub volume_average_window: usize,
    /// Rows treated as one year for the 52-week high/low.
    pub year_window: usize,
    pub support_resistance_window: usize,
    pub support_percentile: f64,
    pub resistance_percentile: f64,
    /// Annualization base; the factor applied is its square root.
    pub trading_days_per_year: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            volatility_window: 20,
            moving_average_windows: vec![20, 50, 200],
            volume_average_window: 20,
            year_window: 252,
            support_resistance_window: 90,
            support_percentile: 0.10,
            resistance_percentile: 0.90,
            trading_days_per_year: DEFAULT_TRADING_DAYS_PER_YEAR,
        }
    }
}

impl MetricsConfig {
    pub fn annualization_factor(&self) -> f64 {
        self.trading_days_per_year.sqrt()
    }

    pub fn validate(&self) -> Result<(), TickerlensError> {
        if self.volatility_window < 2 {
            return Err(TickerlensError::config_invalid(
                "metrics",
                "volatility_window",
                "volatility_window must be at least 2",
            ));
        }
        if self.moving_average_windows.is_empty() {
            return Err(TickerlensError::config_invalid(
                "metrics",
                "moving_average_windows",
                "at least one moving average window is required",
            ));
        }
        for (i, &w) in self.moving_average_windows.iter().enumerate() {
            if w == 0 {
                return Err(TickerlensError::config_invalid(
                    "metrics",
                    "moving_average_windows",
                    "moving average windows must be positive",
                ));
            }
            if self.moving_average_windows[..i].contains(&w) {
                return Err(TickerlensError::config_invalid(
                    "metrics",
                    "moving_average_windows",
                    format!("duplicate moving average window {}", w),
                ));
            }
        }
        for (key, value) in [
            ("volume_average_window", self.volume_average_window),
            ("year_window", self.year_window),
            ("support_resistance_window", self.support_resistance_window),
        ] {
            if value == 0 {
                return Err(TickerlensError::config_invalid(
                    "metrics",
                    key,
                    format!("{} must be positive", key),
                ));
            }
        }
        for (key, value) in [
            ("support_percentile", self.support_percentile),
            ("resistance_percentile", self.resistance_percentile),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TickerlensError::config_invalid(
                    "metrics",
                    key,
                    format!("{} must be between 0 and 1", key),
                ));
            }
        }
        if self.support_percentile > self.resistance_percentile {
            return Err(TickerlensError::config_invalid(
                "metrics",
                "support_percentile",
                "support_percentile must not exceed resistance_percentile",
            ));
        }
        if !(self.trading_days_per_year > 0.0 && self.trading_days_per_year.is_finite()) {
            return Err(TickerlensError::config_invalid(
                "metrics",
                "trading_days_per_year",
                "trading_days_per_year must be positive",
            ));
        }
        Ok(())
    }
}

/// Location and range of the raw price history.
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub csv_dir: PathBuf,
    pub exchange: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cache_ttl: Duration,
}
