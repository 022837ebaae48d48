//! Per-row derived columns.
//!
//! Each submodule computes one column from closes, volumes or another
//! column. Rows without enough trailing history are `None`.
//! - `IndicatorType`: column identity + parameters, also the CSV header name

pub mod drawdown;
pub mod returns;
pub mod sma;
pub mod stddev;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    DailyReturn,
    Volatility(usize),
    CumulativeReturn,
    Sma(usize),
    VolumeSma(usize),
    RunningMax,
    Drawdown,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::DailyReturn => write!(f, "daily_return"),
            IndicatorType::Volatility(period) => write!(f, "volatility_{}", period),
            IndicatorType::CumulativeReturn => write!(f, "cumulative_return"),
            IndicatorType::Sma(period) => write!(f, "ma_{}", period),
            IndicatorType::VolumeSma(period) => write!(f, "volume_ma_{}", period),
            IndicatorType::RunningMax => write!(f, "running_max"),
            IndicatorType::Drawdown => write!(f, "drawdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "ma_20");
    }

    #[test]
    fn indicator_type_display_volatility() {
        assert_eq!(IndicatorType::Volatility(20).to_string(), "volatility_20");
    }

    #[test]
    fn indicator_type_display_fixed_columns() {
        assert_eq!(IndicatorType::DailyReturn.to_string(), "daily_return");
        assert_eq!(IndicatorType::CumulativeReturn.to_string(), "cumulative_return");
        assert_eq!(IndicatorType::RunningMax.to_string(), "running_max");
        assert_eq!(IndicatorType::Drawdown.to_string(), "drawdown");
        assert_eq!(IndicatorType::VolumeSma(20).to_string(), "volume_ma_20");
    }
}
