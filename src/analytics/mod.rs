//! Pure computations over an already-filtered sequence of properties.
//!
//! Nothing here touches storage; callers fetch the working set from a
//! [`RecordStore`](crate::store::RecordStore) first.

pub mod filter;
pub mod histogram;
pub mod history;
pub mod outliers;
pub mod statistics;

pub use histogram::{bedroom_histogram, price_histogram, Histogram};
pub use history::{historical_insights, HistoricalInsight};
pub use outliers::{detect_outliers, price_fence, PriceFence};
pub use statistics::{compute_statistics, PropertyStatistics};

use crate::models::Property;

/// Prices in ascending order.
pub(crate) fn sorted_prices(properties: &[Property]) -> Vec<f64> {
    let mut prices: Vec<f64> = properties.iter().map(|p| p.price).collect();
    prices.sort_by(f64::total_cmp);
    prices
}
