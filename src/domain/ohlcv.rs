//! OHLCV bar and price series representation.

use crate::domain::error::InvalidInputError;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Positive, finite prices with `low <= open,close <= high`.
    pub fn check(&self) -> Result<(), InvalidInputError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Err(InvalidInputError::NonFinitePrice {
                    date: self.date,
                    field,
                });
            }
            if value <= 0.0 {
                return Err(InvalidInputError::NonPositivePrice {
                    date: self.date,
                    field,
                    value,
                });
            }
        }

        if self.high < self.low {
            return Err(InvalidInputError::OhlcInvariant {
                date: self.date,
                reason: format!("high {} below low {}", self.high, self.low),
            });
        }
        for (field, value) in [("open", self.open), ("close", self.close)] {
            if value < self.low || value > self.high {
                return Err(InvalidInputError::OhlcInvariant {
                    date: self.date,
                    reason: format!(
                        "{} {} outside [{}, {}]",
                        field, value, self.low, self.high
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Bars for one instrument, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Re-checks everything an upstream source is supposed to guarantee.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.bars.is_empty() {
            return Err(InvalidInputError::EmptySeries);
        }

        for (i, bar) in self.bars.iter().enumerate() {
            bar.check()?;
            if i > 0 {
                let previous = self.bars[i - 1].date;
                if bar.date <= previous {
                    return Err(InvalidInputError::DatesNotIncreasing {
                        index: i,
                        previous,
                        date: bar.date,
                    });
                }
            }
        }
        Ok(())
    }
}
