//! Price history access port trait.

use crate::domain::error::TickerlensError;
use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `code` within `[start_date, end_date]`, ascending by date.
    fn fetch_ohlcv(
        &self,
        code: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TickerlensError>;

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, TickerlensError>;

    /// First date, last date and bar count, or `None` when there is no data.
    fn get_data_range(
        &self,
        code: &str,
        exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TickerlensError>;
}
