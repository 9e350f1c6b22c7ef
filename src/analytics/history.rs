use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::analytics::statistics::mean;
use crate::models::{DateRange, Property};

/// Aggregates for one calendar month of listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalInsight {
    pub year: i32,
    pub month: u32,
    pub count: usize,
    pub average_price: f64,
    /// Rounded to two decimals
    pub average_square_feet: f64,
}

#[derive(Default)]
struct Bucket {
    prices: Vec<f64>,
    area_sum: u64,
}

/// Monthly buckets of listings inside `range`, oldest first.
///
/// Months without listings are omitted rather than reported as zero.
pub fn historical_insights(properties: &[Property], range: &DateRange) -> Vec<HistoricalInsight> {
    let mut buckets: BTreeMap<(i32, u32), Bucket> = BTreeMap::new();

    for property in properties.iter().filter(|p| range.contains(&p.date_listed)) {
        let key = (property.date_listed.year(), property.date_listed.month());
        let bucket = buckets.entry(key).or_default();
        bucket.prices.push(property.price);
        bucket.area_sum += u64::from(property.square_feet);
    }

    buckets
        .into_iter()
        .map(|((year, month), bucket)| {
            let count = bucket.prices.len();
            HistoricalInsight {
                year,
                month,
                count,
                average_price: mean(&bucket.prices),
                average_square_feet: round2(bucket.area_sum as f64 / count as f64),
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
