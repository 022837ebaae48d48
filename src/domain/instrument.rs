//! Instrument catalogue and price history loading for multi-symbol runs.
//!
//! Parses code lists from configuration, attaches display metadata, and
//! fetches each code's series, skipping codes that have no data.

use crate::domain::error::TickerlensError;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub code: String,
    pub name: Option<String>,
    pub sector: Option<String>,
}

impl Instrument {
    pub fn bare(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: None,
            sector: None,
        }
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.code),
            None => self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CodeListError {
    #[error("empty token in code list")]
    EmptyToken,

    #[error("duplicate code: {0}")]
    DuplicateCode(String),
}

pub fn parse_codes(input: &str) -> Result<Vec<String>, CodeListError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(CodeListError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(CodeListError::DuplicateCode(code));
        }
        codes.push(code);
    }

    Ok(codes)
}

/// Reads `[instruments] codes` and the optional per-code `name`/`sector`
/// sections.
pub fn load_instruments(config: &dyn ConfigPort) -> Result<Vec<Instrument>, TickerlensError> {
    let raw = config
        .get_string("instruments", "codes")
        .ok_or_else(|| TickerlensError::ConfigMissing {
            section: "instruments".to_string(),
            key: "codes".to_string(),
        })?;
    let codes = parse_codes(&raw)
        .map_err(|e| TickerlensError::config_invalid("instruments", "codes", e.to_string()))?;

    Ok(codes
        .into_iter()
        .map(|code| Instrument {
            name: config.get_string(&code, "name"),
            sector: config.get_string(&code, "sector"),
            code,
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct SkippedCode {
    pub code: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    FetchFailed(String),
}

pub struct LoadedSeries {
    pub series: Vec<(Instrument, PriceSeries)>,
    pub skipped: Vec<SkippedCode>,
}

pub fn load_series(
    data_port: &dyn DataPort,
    instruments: &[Instrument],
    exchange: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<LoadedSeries, TickerlensError> {
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for instrument in instruments {
        let code = &instrument.code;
        let bars = match data_port.fetch_ohlcv(code, exchange, start_date, end_date) {
            Ok(bars) => bars,
            Err(e) => {
                warn!(%code, %exchange, error = %e, "skipping instrument");
                skipped.push(SkippedCode {
                    code: code.clone(),
                    reason: SkipReason::FetchFailed(e.to_string()),
                });
                continue;
            }
        };

        if bars.is_empty() {
            warn!(%code, %exchange, "skipping instrument (no data found)");
            skipped.push(SkippedCode {
                code: code.clone(),
                reason: SkipReason::NoData,
            });
            continue;
        }

        info!(%code, bars = bars.len(), "loaded price history");
        series.push((instrument.clone(), PriceSeries::new(code.clone(), bars)));
    }

    if series.is_empty() {
        let code = match instruments {
            [only] => only.code.clone(),
            _ => "all".to_string(),
        };
        return Err(TickerlensError::NoData {
            code,
            exchange: exchange.to_string(),
        });
    }

    Ok(LoadedSeries { series, skipped })
}
