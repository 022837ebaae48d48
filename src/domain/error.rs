//! Domain error types.

use chrono::NaiveDate;

/// A price series that cannot be fed to the metrics pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("dates not strictly increasing at row {index}: {date} follows {previous}")]
    DatesNotIncreasing {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("non-positive {field} on {date}: {value}")]
    NonPositivePrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    #[error("non-finite {field} on {date}")]
    NonFinitePrice { date: NaiveDate, field: &'static str },

    #[error("bar on {date} violates OHLC bounds: {reason}")]
    OhlcInvariant { date: NaiveDate, reason: String },

    #[error("invalid metrics setting {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}

impl InvalidInputError {
    /// Carries a rejected `MetricsConfig` into the pipeline's error type.
    pub fn from_config(err: TickerlensError) -> Self {
        match err {
            TickerlensError::ConfigInvalid { key, reason, .. } => Self::InvalidConfig { key, reason },
            other => Self::InvalidConfig {
                key: "metrics".to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// Top-level error type for tickerlens.
#[derive(Debug, thiserror::Error)]
pub enum TickerlensError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {code} on {exchange}")]
    NoData { code: String, exchange: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TickerlensError {
    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        TickerlensError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            TickerlensError::Io(_) => 1,
            TickerlensError::ConfigParse { .. }
            | TickerlensError::ConfigMissing { .. }
            | TickerlensError::ConfigInvalid { .. }
            | TickerlensError::InvalidInput(InvalidInputError::InvalidConfig { .. }) => 2,
            TickerlensError::DataSource { .. } => 3,
            TickerlensError::InvalidInput(_) => 4,
            TickerlensError::NoData { .. } => 5,
            TickerlensError::Report { .. } => 6,
        }
    }
}

impl From<&TickerlensError> for std::process::ExitCode {
    fn from(err: &TickerlensError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
