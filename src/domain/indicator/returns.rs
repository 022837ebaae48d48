//! Daily and cumulative returns.
//!
//! R[i] = C[i] / C[i-1] - 1, undefined at i = 0.
//! CUM[i] = prod(1 + R[j] for j in 1..=i) - 1, undefined at i = 0.
//! Monthly returns compound the defined R[i] within each calendar month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(closes.windows(2).map(|w| Some(w[1] / w[0] - 1.0)));
    out
}

pub fn cumulative_returns(daily: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut growth = 1.0_f64;
    daily
        .iter()
        .map(|r| {
            r.map(|r| {
                growth *= 1.0 + r;
                growth - 1.0
            })
        })
        .collect()
}

/// Compounded return of one calendar month, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReturn {
    pub year: i32,
    pub month: u32,
    pub sessions: usize,
    /// `None` when the month holds only the anchor row.
    pub return_pct: Option<f64>,
}

/// `dates` and `daily` are row-aligned and in ascending date order.
pub fn monthly_returns(dates: &[NaiveDate], daily: &[Option<f64>]) -> Vec<MonthlyReturn> {
    let mut out = Vec::new();
    let mut current: Option<(MonthlyReturn, Option<f64>)> = None;

    for (date, r) in dates.iter().zip(daily) {
        let key = (date.year(), date.month());
        if current
            .as_ref()
            .is_some_and(|(m, _)| (m.year, m.month) != key)
        {
            out.extend(current.take().map(close_month));
        }
        let (month, growth) = current.get_or_insert_with(|| {
            let month = MonthlyReturn {
                year: key.0,
                month: key.1,
                sessions: 0,
                return_pct: None,
            };
            (month, None)
        });
        month.sessions += 1;
        if let Some(r) = r {
            *growth = Some(growth.unwrap_or(1.0) * (1.0 + r));
        }
    }
    out.extend(current.map(close_month));
    out
}

fn close_month((mut month, growth): (MonthlyReturn, Option<f64>)) -> MonthlyReturn {
    month.return_pct = growth.map(|g| (g - 1.0) * 100.0);
    month
}
