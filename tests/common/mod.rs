#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use tickerlens::domain::error::TickerlensError;
pub use tickerlens::domain::ohlcv::{PriceBar, PriceSeries};
use tickerlens::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        code: &str,
        _exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TickerlensError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(TickerlensError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(code)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self, _exchange: &str) -> Result<Vec<String>, TickerlensError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        code: &str,
        _exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TickerlensError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(TickerlensError::DataSource {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A bar whose range brackets `close` by one unit each side.
pub fn make_bar(date: NaiveDate, close: f64) -> PriceBar {
    PriceBar {
        date,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000,
    }
}

/// Consecutive calendar days starting at `start_date`.
pub fn series_from_closes(symbol: &str, start_date: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(start + chrono::Duration::days(i as i64), c))
        .collect();
    PriceSeries::new(symbol, bars)
}

/// Deterministic zig-zag drifting upward, always above 10.
pub fn generate_closes(count: usize, start_price: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let wiggle = match i % 4 {
                0 => 0.0,
                1 => 2.5,
                2 => -1.5,
                _ => 1.0,
            };
            start_price + i as f64 * 0.1 + wiggle
        })
        .collect()
}

pub fn write_price_csv(dir: &std::path::Path, code: &str, exchange: &str, bars: &[PriceBar]) {
    let mut content = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.date.format("%Y-%m-%d"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    std::fs::write(dir.join(format!("{}_{}.csv", code, exchange)), content).unwrap();
}
