//! CSV report adapter implementing ReportPort.
//!
//! One row per derived row: the bar's OHLCV fields followed by every derived
//! column. Undefined values are written as empty cells.

use std::fs;
use std::path::Path;

use crate::domain::config::MetricsConfig;
use crate::domain::derived::DerivedSeries;
use crate::domain::error::TickerlensError;
use crate::domain::summary::SummaryStatistics;
use crate::ports::report_port::ReportPort;
use tracing::debug;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn render(derived: &DerivedSeries) -> Result<String, TickerlensError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());

        let mut header: Vec<String> = ["date", "open", "high", "low", "close", "volume"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.extend(derived.columns().iter().map(|c| c.to_string()));
        wtr.write_record(&header).map_err(report_error)?;

        for row in &derived.rows {
            let bar = &row.bar;
            let mut record = vec![
                bar.date.format("%Y-%m-%d").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
            ];
            record.extend(
                derived
                    .row_values(row)
                    .into_iter()
                    .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&record).map_err(report_error)?;
        }

        let bytes = wtr.into_inner().map_err(|e| TickerlensError::Report {
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| TickerlensError::Report {
            reason: e.to_string(),
        })
    }
}

fn report_error(e: csv::Error) -> TickerlensError {
    TickerlensError::Report {
        reason: format!("CSV write error: {}", e),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        derived: &DerivedSeries,
        _summary: &SummaryStatistics,
        _config: &MetricsConfig,
        output_path: &str,
    ) -> Result<(), TickerlensError> {
        let content = Self::render(derived)?;

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(TickerlensError::Io)?;
        }
        fs::write(path, content).map_err(TickerlensError::Io)?;
        debug!(path = %path.display(), rows = derived.len(), "wrote derived series");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::{PriceBar, PriceSeries};
    use crate::domain::pipeline::compute;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample() -> (DerivedSeries, SummaryStatistics, MetricsConfig) {
        let config = MetricsConfig {
            moving_average_windows: vec![2],
            volatility_window: 2,
            volume_average_window: 2,
            ..MetricsConfig::default()
        };
        let bars = [100.0, 110.0, 99.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 2 + i as u32).unwrap(),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 10,
            })
            .collect();
        let (derived, summary) = compute(&PriceSeries::new("ASTS", bars), &config).unwrap();
        (derived, summary, config)
    }

    #[test]
    fn header_lists_bar_and_derived_columns() {
        let (derived, _, _) = sample();
        let csv = CsvReportAdapter::render(&derived).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "date,open,high,low,close,volume,daily_return,volatility_2,cumulative_return,ma_2,volume_ma_2,running_max,drawdown"
        );
    }

    #[test]
    fn undefined_values_are_empty_cells() {
        let (derived, _, _) = sample();
        let csv = CsvReportAdapter::render(&derived).unwrap();
        let first = csv.lines().nth(1).unwrap();
        assert_eq!(first, "2024-01-02,100,100,100,100,10,,,,,,100,0");
    }

    #[test]
    fn one_line_per_row() {
        let (derived, _, _) = sample();
        let csv = CsvReportAdapter::render(&derived).unwrap();
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn write_creates_parent_directories() {
        let (derived, summary, config) = sample();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("asts.csv");

        CsvReportAdapter
            .write(&derived, &summary, &config, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("date,open"));
    }
}
