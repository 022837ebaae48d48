//! Time-bounded cache in front of any [`DataPort`].
//!
//! `fetch_ohlcv` results are reused for `ttl` after they were fetched, keyed
//! by code, exchange and date range. Failed fetches are never stored.
//! Symbol listings and data ranges always go to the inner port.

use crate::domain::error::TickerlensError;
use crate::domain::ohlcv::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

type CacheKey = (String, String, NaiveDate, NaiveDate);

#[derive(Debug, Clone)]
struct CacheEntry {
    bars: Vec<PriceBar>,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() >= ttl
    }
}

pub struct CachedDataAdapter<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl<P: DataPort> CachedDataAdapter<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drops every cached range for one instrument.
    pub fn invalidate(&self, code: &str, exchange: &str) {
        self.entries()
            .retain(|(c, e, _, _), _| !(c == code && e == exchange));
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Unexpired entries currently held.
    pub fn len(&self) -> usize {
        self.entries()
            .values()
            .filter(|e| !e.is_expired(self.ttl))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every mutation is a single map call, so a poisoned map is still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, key: &CacheKey) -> Option<Vec<PriceBar>> {
        self.entries()
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.bars.clone())
    }

    fn store(&self, key: CacheKey, bars: Vec<PriceBar>) {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        if entries.len() < before {
            debug!(evicted = before - entries.len(), "evicted expired price history");
        }
        entries.insert(
            key,
            CacheEntry {
                bars,
                fetched_at: Instant::now(),
            },
        );
    }
}

impl<P: DataPort> DataPort for CachedDataAdapter<P> {
    fn fetch_ohlcv(
        &self,
        code: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TickerlensError> {
        let key = (code.to_string(), exchange.to_string(), start_date, end_date);
        if let Some(bars) = self.lookup(&key) {
            debug!(%code, %exchange, "price history cache hit");
            return Ok(bars);
        }

        let bars = self.inner.fetch_ohlcv(code, exchange, start_date, end_date)?;
        self.store(key, bars.clone());
        Ok(bars)
    }

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, TickerlensError> {
        self.inner.list_symbols(exchange)
    }

    fn get_data_range(
        &self,
        code: &str,
        exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TickerlensError> {
        self.inner.get_data_range(code, exchange)
    }
}
