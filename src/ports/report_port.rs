//! Report generation port trait.

use crate::domain::config::MetricsConfig;
use crate::domain::derived::DerivedSeries;
use crate::domain::error::TickerlensError;
use crate::domain::summary::SummaryStatistics;

/// Port for writing computed metrics.
pub trait ReportPort {
    fn write(
        &self,
        derived: &DerivedSeries,
        summary: &SummaryStatistics,
        config: &MetricsConfig,
        output_path: &str,
    ) -> Result<(), TickerlensError>;
}
