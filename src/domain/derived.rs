//! Row-aligned derived series: each input bar plus the columns computed from
//! it and its trailing history.

use crate::domain::config::MetricsConfig;
use crate::domain::indicator::returns::MonthlyReturn;
use crate::domain::indicator::{drawdown, returns, sma, stddev, IndicatorType};
use crate::domain::ohlcv::{PriceBar, PriceSeries};

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub bar: PriceBar,
    pub daily_return: Option<f64>,
    /// Annualized, in percent.
    pub rolling_volatility: Option<f64>,
    pub cumulative_return: Option<f64>,
    /// Aligned with [`DerivedSeries::moving_average_windows`].
    pub moving_averages: Vec<Option<f64>>,
    pub volume_average: Option<f64>,
    pub running_max: f64,
    /// Percent below `running_max`.
    pub drawdown: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    pub symbol: String,
    pub volatility_window: usize,
    pub moving_average_windows: Vec<usize>,
    pub volume_average_window: usize,
    pub rows: Vec<DerivedRow>,
}

impl DerivedSeries {
    /// Expects a series that already passed [`PriceSeries::validate`].
    pub fn build(series: &PriceSeries, config: &MetricsConfig) -> Self {
        let closes = series.closes();
        let volumes: Vec<f64> = series.bars.iter().map(|b| b.volume as f64).collect();

        let daily = returns::daily_returns(&closes);
        let cumulative = returns::cumulative_returns(&daily);
        let annualize = config.annualization_factor() * 100.0;
        let volatility: Vec<Option<f64>> = stddev::rolling_stddev(&daily, config.volatility_window)
            .into_iter()
            .map(|sd| sd.map(|sd| sd * annualize))
            .collect();
        let averages: Vec<Vec<Option<f64>>> = config
            .moving_average_windows
            .iter()
            .map(|&k| sma::rolling_mean(&closes, k))
            .collect();
        let volume_average = sma::rolling_mean(&volumes, config.volume_average_window);
        let peaks = drawdown::running_max(&closes);
        let drawdowns = drawdown::drawdown(&closes, &peaks);

        let rows = series
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| DerivedRow {
                bar: bar.clone(),
                daily_return: daily[i],
                rolling_volatility: volatility[i],
                cumulative_return: cumulative[i],
                moving_averages: averages.iter().map(|col| col[i]).collect(),
                volume_average: volume_average[i],
                running_max: peaks[i],
                drawdown: drawdowns[i],
            })
            .collect();

        Self {
            symbol: series.symbol.clone(),
            volatility_window: config.volatility_window,
            moving_average_windows: config.moving_average_windows.clone(),
            volume_average_window: config.volume_average_window,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Moving average column for window `k`, if it was configured.
    pub fn moving_average(&self, k: usize) -> Option<Vec<Option<f64>>> {
        let idx = self.moving_average_windows.iter().position(|&w| w == k)?;
        Some(self.rows.iter().map(|r| r.moving_averages[idx]).collect())
    }

    /// Defined daily returns only, in row order.
    pub fn daily_returns(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.daily_return).collect()
    }

    pub fn monthly_returns(&self) -> Vec<MonthlyReturn> {
        let dates: Vec<_> = self.rows.iter().map(|r| r.bar.date).collect();
        let daily: Vec<_> = self.rows.iter().map(|r| r.daily_return).collect();
        returns::monthly_returns(&dates, &daily)
    }

    /// Derived columns in output order.
    pub fn columns(&self) -> Vec<IndicatorType> {
        let mut cols = vec![
            IndicatorType::DailyReturn,
            IndicatorType::Volatility(self.volatility_window),
            IndicatorType::CumulativeReturn,
        ];
        cols.extend(self.moving_average_windows.iter().map(|&k| IndicatorType::Sma(k)));
        cols.push(IndicatorType::VolumeSma(self.volume_average_window));
        cols.push(IndicatorType::RunningMax);
        cols.push(IndicatorType::Drawdown);
        cols
    }

    /// Values for [`Self::columns`] on one row.
    pub fn row_values(&self, row: &DerivedRow) -> Vec<Option<f64>> {
        let mut values = vec![
            row.daily_return,
            row.rolling_volatility,
            row.cumulative_return,
        ];
        values.extend(row.moving_averages.iter().copied());
        values.push(row.volume_average);
        values.push(Some(row.running_max));
        values.push(Some(row.drawdown));
        values
    }
}
