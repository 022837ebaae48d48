//! JSON summary report adapter implementing ReportPort.
//!
//! Writes the instrument, its date span, the metrics configuration used and
//! the summary statistics. Undefined statistics serialize as `null`.

use std::fs;
use std::path::Path;

use crate::domain::config::MetricsConfig;
use crate::domain::derived::DerivedSeries;
use crate::domain::error::TickerlensError;
use crate::domain::summary::SummaryStatistics;
use crate::ports::report_port::ReportPort;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    pub symbol: &'a str,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub config: &'a MetricsConfig,
    pub summary: &'a SummaryStatistics,
}

impl<'a> SummaryReport<'a> {
    pub fn new(
        derived: &'a DerivedSeries,
        summary: &'a SummaryStatistics,
        config: &'a MetricsConfig,
    ) -> Self {
        Self {
            symbol: &derived.symbol,
            rows: derived.len(),
            first_date: derived.rows.first().map(|r| r.bar.date),
            last_date: derived.rows.last().map(|r| r.bar.date),
            config,
            summary,
        }
    }

    pub fn to_json(&self) -> Result<String, TickerlensError> {
        serde_json::to_string_pretty(self).map_err(|e| TickerlensError::Report {
            reason: format!("JSON encode error: {}", e),
        })
    }
}

pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn write(
        &self,
        derived: &DerivedSeries,
        summary: &SummaryStatistics,
        config: &MetricsConfig,
        output_path: &str,
    ) -> Result<(), TickerlensError> {
        let json = SummaryReport::new(derived, summary, config).to_json()?;

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(TickerlensError::Io)?;
        }
        fs::write(path, json).map_err(TickerlensError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::{PriceBar, PriceSeries};
    use crate::domain::pipeline::compute;
    use tempfile::TempDir;

    fn single_row() -> (DerivedSeries, SummaryStatistics, MetricsConfig) {
        let config = MetricsConfig::default();
        let bar = PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            open: 20.0,
            high: 21.0,
            low: 19.0,
            close: 20.5,
            volume: 5000,
        };
        let (derived, summary) = compute(&PriceSeries::new("RKLB", vec![bar]), &config).unwrap();
        (derived, summary, config)
    }

    #[test]
    fn undefined_fields_are_null() {
        let (derived, summary, config) = single_row();
        let json = SummaryReport::new(&derived, &summary, &config).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "RKLB");
        assert_eq!(value["rows"], 1);
        assert_eq!(value["first_date"], "2024-03-01");
        assert!(value["summary"]["total_return_pct"].is_null());
        assert!(value["summary"]["daily_std_dev_pct"].is_null());
        assert_eq!(value["summary"]["sharpe_ratio"], 0.0);
        assert_eq!(value["summary"]["current_price"], 20.5);
        assert_eq!(value["config"]["moving_average_windows"][2], 200);
        assert_eq!(value["summary"]["monthly_returns"][0]["month"], 3);
        assert!(value["summary"]["monthly_returns"][0]["return_pct"].is_null());
    }

    #[test]
    fn monthly_returns_span_year_boundary() {
        let config = MetricsConfig::default();
        let bars = [
            (NaiveDate::from_ymd_opt(2023, 12, 28).unwrap(), 40.0),
            (NaiveDate::from_ymd_opt(2023, 12, 29).unwrap(), 44.0),
            (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 33.0),
        ]
        .iter()
        .map(|&(date, close)| PriceBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 100,
        })
        .collect();
        let (derived, summary) = compute(&PriceSeries::new("ASTS", bars), &config).unwrap();
        let json = SummaryReport::new(&derived, &summary, &config).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let months = value["summary"]["monthly_returns"].as_array().unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0]["year"], 2023);
        assert_eq!(months[0]["month"], 12);
        assert_eq!(months[1]["year"], 2024);
        assert_eq!(months[1]["month"], 1);
        assert_eq!(months[1]["sessions"], 1);
        let january = months[1]["return_pct"].as_f64().unwrap();
        assert!((january - -25.0).abs() < 1e-9);
    }

    #[test]
    fn write_outputs_file() {
        let (derived, summary, config) = single_row();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rklb.json");

        JsonReportAdapter
            .write(&derived, &summary, &config, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"symbol\": \"RKLB\""));
    }
}
