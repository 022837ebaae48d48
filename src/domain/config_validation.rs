//! Configuration validation and construction.
//!
//! Validates every config field before a run and builds the typed
//! [`DataConfig`] and [`MetricsConfig`] from a [`ConfigPort`].

use crate::domain::config::{DataConfig, MetricsConfig, DEFAULT_CACHE_TTL_SECS};
use crate::domain::error::TickerlensError;
use crate::domain::instrument::load_instruments;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), TickerlensError> {
    build_data_config(config)?;
    load_instruments(config)?;
    Ok(())
}

pub fn validate_metrics_config(config: &dyn ConfigPort) -> Result<(), TickerlensError> {
    build_metrics_config(config)?.validate()
}

pub fn build_data_config(config: &dyn ConfigPort) -> Result<DataConfig, TickerlensError> {
    let csv_dir = required_string(config, "data", "csv_dir")?;
    let exchange = required_string(config, "data", "exchange")?;

    let start_date = parse_date(config.get_string("data", "start_date").as_deref(), "start_date")?;
    let end_date = parse_date(config.get_string("data", "end_date").as_deref(), "end_date")?;
    if start_date >= end_date {
        return Err(TickerlensError::config_invalid(
            "data",
            "start_date",
            "start_date must be before end_date",
        ));
    }

    let ttl = config.get_int("data", "cache_ttl_secs", DEFAULT_CACHE_TTL_SECS as i64);
    let ttl = u64::try_from(ttl).map_err(|_| {
        TickerlensError::config_invalid("data", "cache_ttl_secs", "cache_ttl_secs must be non-negative")
    })?;

    Ok(DataConfig {
        csv_dir: PathBuf::from(csv_dir),
        exchange,
        start_date,
        end_date,
        cache_ttl: Duration::from_secs(ttl),
    })
}

/// Missing keys fall back to [`MetricsConfig::default`].
pub fn build_metrics_config(config: &dyn ConfigPort) -> Result<MetricsConfig, TickerlensError> {
    let defaults = MetricsConfig::default();

    let moving_average_windows = match config.get_string("metrics", "moving_average_windows") {
        Some(raw) => parse_windows(&raw)?,
        None => defaults.moving_average_windows,
    };

    let metrics = MetricsConfig {
        volatility_window: window(config, "volatility_window", defaults.volatility_window)?,
        moving_average_windows,
        volume_average_window: window(
            config,
            "volume_average_window",
            defaults.volume_average_window,
        )?,
        year_window: window(config, "year_window", defaults.year_window)?,
        support_resistance_window: window(
            config,
            "support_resistance_window",
            defaults.support_resistance_window,
        )?,
        support_percentile: config.get_double(
            "metrics",
            "support_percentile",
            defaults.support_percentile,
        ),
        resistance_percentile: config.get_double(
            "metrics",
            "resistance_percentile",
            defaults.resistance_percentile,
        ),
        trading_days_per_year: config.get_double(
            "metrics",
            "trading_days_per_year",
            defaults.trading_days_per_year,
        ),
    };
    metrics.validate()?;
    Ok(metrics)
}

/// Comma-separated positive window sizes, e.g. `20, 50, 200`.
pub fn parse_windows(input: &str) -> Result<Vec<usize>, TickerlensError> {
    input
        .split(',')
        .map(|token| {
            token.trim().parse::<usize>().map_err(|_| {
                TickerlensError::config_invalid(
                    "metrics",
                    "moving_average_windows",
                    format!("invalid window size '{}'", token.trim()),
                )
            })
        })
        .collect()
}

fn window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, TickerlensError> {
    let value = config.get_int("metrics", key, default as i64);
    usize::try_from(value)
        .map_err(|_| TickerlensError::config_invalid("metrics", key, format!("{} must be positive", key)))
}

fn required_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, TickerlensError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(TickerlensError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, TickerlensError> {
    match value {
        None => Err(TickerlensError::ConfigMissing {
            section: "data".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            TickerlensError::config_invalid(
                "data",
                field,
                format!("invalid {} format, expected YYYY-MM-DD", field),
            )
        }),
    }
}
