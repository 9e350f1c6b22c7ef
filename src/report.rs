use serde::Serialize;
use tracing::debug;

use crate::analytics::{self, Histogram, HistoricalInsight, PriceFence, PropertyStatistics};
use crate::config::AppConfig;
use crate::error::Result;
use crate::ingest::ImportSummary;
use crate::models::{DateRange, FilterCriteria, Pagination, Property};
use crate::service;
use crate::store::RecordStore;

/// Everything the report binary writes out, in one document
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub import: ImportSummary,
    pub statistics: PropertyStatistics,
    pub outlier_fence: Option<PriceFence>,
    pub outliers: Vec<Property>,
    pub history: Vec<HistoricalInsight>,
    pub price_histogram: Histogram,
    pub bedroom_histogram: Histogram,
}

/// Compute every analytic over one snapshot of the whole store.
pub async fn build_report(
    store: &dyn RecordStore,
    import: ImportSummary,
    config: &AppConfig,
) -> Result<AnalyticsReport> {
    let all = service::list_properties(
        store,
        &FilterCriteria::default(),
        Pagination::new(0, usize::MAX),
    )
    .await?;
    debug!("Building report over {} properties", all.len());

    Ok(AnalyticsReport {
        import,
        statistics: analytics::compute_statistics(&all),
        outlier_fence: analytics::price_fence(&all, config.outlier_factor)?,
        outliers: analytics::detect_outliers(&all, config.outlier_factor, config.page())?,
        history: analytics::historical_insights(&all, &DateRange::default()),
        price_histogram: analytics::price_histogram(&all, config.histogram_bins)?,
        bedroom_histogram: analytics::bedroom_histogram(&all),
    })
}
