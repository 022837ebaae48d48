//! Plain-text summary table for terminal output.

use crate::domain::derived::DerivedSeries;
use crate::domain::instrument::Instrument;
use crate::domain::summary::SummaryStatistics;

const UNDEFINED: &str = "n/a";

fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

fn or_undefined(value: Option<f64>, fmt: fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| UNDEFINED.to_string())
}

fn line(out: &mut String, label: &str, value: String) {
    out.push_str(&format!("{:<24}{}\n", format!("{}:", label), value));
}

pub fn format_summary(
    instrument: &Instrument,
    derived: &DerivedSeries,
    summary: &SummaryStatistics,
) -> String {
    let mut out = format!("=== {} ===\n", instrument.display_name());
    if let Some(sector) = &instrument.sector {
        line(&mut out, "Sector", sector.clone());
    }
    if let (Some(first), Some(last)) = (derived.rows.first(), derived.rows.last()) {
        line(
            &mut out,
            "Period",
            format!("{} to {} ({} sessions)", first.bar.date, last.bar.date, derived.len()),
        );
    }

    out.push_str("\n-- Price --\n");
    line(&mut out, "Current Price", format_price(summary.current_price));
    line(
        &mut out,
        "Period Change",
        format!(
            "{} ({})",
            format_pct(summary.period_change_pct),
            format_price(summary.period_change_abs)
        ),
    );
    line(&mut out, "52W High", format_price(summary.high_52w));
    line(&mut out, "52W Low", format_price(summary.low_52w));
    line(
        &mut out,
        "Avg Volume",
        format!("{:.2}M", summary.average_volume / 1e6),
    );
    line(&mut out, "Support", or_undefined(summary.support_level, format_price));
    line(
        &mut out,
        "Resistance",
        or_undefined(summary.resistance_level, format_price),
    );
    line(
        &mut out,
        "From Support",
        or_undefined(summary.distance_from_support_pct, format_pct),
    );
    line(
        &mut out,
        "From Resistance",
        or_undefined(summary.distance_from_resistance_pct, format_pct),
    );

    out.push_str("\n-- Returns --\n");
    line(
        &mut out,
        "Total Return",
        or_undefined(summary.total_return_pct, format_pct),
    );
    line(&mut out, "Best Day", or_undefined(summary.best_day_pct, format_pct));
    line(&mut out, "Worst Day", or_undefined(summary.worst_day_pct, format_pct));
    line(
        &mut out,
        "Avg Daily Return",
        summary
            .average_daily_return_pct
            .map(|v| format!("{:.3}%", v))
            .unwrap_or_else(|| UNDEFINED.to_string()),
    );

    out.push_str("\n-- Risk --\n");
    line(&mut out, "Max Drawdown", format_pct(summary.max_drawdown_pct));
    line(&mut out, "Sharpe Ratio", format!("{:.2}", summary.sharpe_ratio));
    line(
        &mut out,
        "Daily Std Dev",
        or_undefined(summary.daily_std_dev_pct, format_pct),
    );
    line(
        &mut out,
        "Downside Deviation",
        format_pct(summary.downside_deviation_pct),
    );
    line(
        &mut out,
        "Current Volatility",
        or_undefined(summary.current_volatility_pct, format_pct),
    );
    line(
        &mut out,
        "Peak Volatility",
        or_undefined(summary.peak_volatility_pct, format_pct),
    );

    if !summary.monthly_returns.is_empty() {
        out.push_str("\n-- Monthly Returns --\n");
        for m in &summary.monthly_returns {
            line(
                &mut out,
                &format!("{:04}-{:02}", m.year, m.month),
                or_undefined(m.return_pct, format_pct),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::MetricsConfig;
    use crate::domain::ohlcv::{PriceBar, PriceSeries};
    use crate::domain::pipeline::compute;
    use chrono::NaiveDate;

    fn run(prices: &[f64]) -> (DerivedSeries, SummaryStatistics) {
        let bars = prices
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 2 + i as u32).unwrap(),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 2_500_000,
            })
            .collect();
        compute(&PriceSeries::new("ASTS", bars), &MetricsConfig::default()).unwrap()
    }

    #[test]
    fn format_pct_two_decimals() {
        assert_eq!(format_pct(-10.0), "-10.00%");
        assert_eq!(format_price(3.14159), "$3.14");
    }

    #[test]
    fn header_uses_catalogue_name() {
        let (derived, summary) = run(&[100.0, 110.0, 99.0]);
        let instrument = Instrument {
            code: "ASTS".into(),
            name: Some("AST SpaceMobile".into()),
            sector: Some("Space Technology".into()),
        };
        let text = format_summary(&instrument, &derived, &summary);
        assert!(text.starts_with("=== AST SpaceMobile (ASTS) ===\n"));
        assert!(text.contains("Sector:                 Space Technology\n"));
        assert!(text.contains("2024-01-02 to 2024-01-04 (3 sessions)"));
    }

    #[test]
    fn values_are_formatted() {
        let (derived, summary) = run(&[100.0, 110.0, 99.0]);
        let text = format_summary(&Instrument::bare("ASTS"), &derived, &summary);
        assert!(text.contains("Current Price:          $99.00\n"));
        assert!(text.contains("Max Drawdown:           -10.00%\n"));
        assert!(text.contains("Total Return:           -1.00%\n"));
        assert!(text.contains("Avg Volume:             2.50M\n"));
    }

    #[test]
    fn undefined_values_show_marker() {
        let (derived, summary) = run(&[100.0]);
        let text = format_summary(&Instrument::bare("ASTS"), &derived, &summary);
        assert!(text.contains("Total Return:           n/a\n"));
        assert!(text.contains("Current Volatility:     n/a\n"));
        assert!(text.contains("Sharpe Ratio:           0.00\n"));
        assert!(text.contains("2024-01:                n/a\n"));
    }

    #[test]
    fn monthly_returns_are_listed() {
        let (derived, summary) = run(&[100.0, 110.0, 99.0]);
        let text = format_summary(&Instrument::bare("ASTS"), &derived, &summary);
        assert!(text.contains("-- Monthly Returns --\n2024-01:                -1.00%\n"));
    }
}
