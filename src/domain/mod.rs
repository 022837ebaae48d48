//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod stats;
pub mod derived;
pub mod summary;
pub mod pipeline;
pub mod config;
pub mod config_validation;
pub mod instrument;
pub mod error;
