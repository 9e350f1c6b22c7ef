//! Interquartile-range outlier detection on price.
//!
//! Quartiles use linear interpolation at rank `p * (n - 1)` over the
//! ascending prices. A record is an outlier when its price lies strictly
//! below `Q1 - factor * IQR` or strictly above `Q3 + factor * IQR`.

use serde::{Deserialize, Serialize};

use crate::analytics::sorted_prices;
use crate::error::{PropertyError, Result};
use crate::models::{Pagination, Property};

pub const DEFAULT_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceFence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl PriceFence {
    /// Fence over ascending prices; `None` below two values.
    pub fn from_sorted(sorted: &[f64], factor: f64) -> Option<Self> {
        if sorted.len() < 2 {
            return None;
        }
        let q1 = percentile(sorted, 0.25);
        let q3 = percentile(sorted, 0.75);
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - factor * iqr,
            upper: q3 + factor * iqr,
        })
    }

    pub fn excludes(&self, price: f64) -> bool {
        price < self.lower || price > self.upper
    }
}

/// Linear-interpolation percentile of a non-empty ascending slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;
    sorted[lo] + weight * (sorted[hi] - sorted[lo])
}

pub fn validate_factor(factor: f64) -> Result<()> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(())
    } else {
        Err(PropertyError::InvalidFactor { factor })
    }
}

/// The fence for a record set, after checking the factor.
pub fn price_fence(properties: &[Property], factor: f64) -> Result<Option<PriceFence>> {
    validate_factor(factor)?;
    Ok(PriceFence::from_sorted(&sorted_prices(properties), factor))
}

/// Outliers in input order, then paginated.
pub fn detect_outliers(
    properties: &[Property],
    factor: f64,
    page: Pagination,
) -> Result<Vec<Property>> {
    let Some(fence) = price_fence(properties, factor)? else {
        return Ok(Vec::new());
    };
    let outliers = properties
        .iter()
        .filter(|p| fence.excludes(p.price))
        .cloned()
        .collect();
    Ok(page.apply(outliers))
}
