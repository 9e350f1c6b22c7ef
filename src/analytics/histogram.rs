//! Numeric histogram data for the price and bedroom distributions.

use serde::{Deserialize, Serialize};

use crate::error::{PropertyError, Result};
use crate::models::Property;

pub const DEFAULT_PRICE_BINS: usize = 50;

/// Bedroom counts bucketed on integer edges 1..=9.
const BEDROOM_EDGES: std::ops::RangeInclusive<u32> = 1..=9;

/// `edges.len() == counts.len() + 1`; bin `i` covers `[edges[i], edges[i + 1])`,
/// the last bin is closed on the right.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn count_into(&mut self, value: f64) {
        let bins = self.counts.len();
        let (Some(&lo), Some(&hi)) = (self.edges.first(), self.edges.last()) else {
            return;
        };
        if bins == 0 || value < lo || value > hi {
            return;
        }
        let width = (hi - lo) / bins as f64;
        let mut index = (((value - lo) / width) as usize).min(bins - 1);
        // float division can land one bin off next to an edge
        if value < self.edges[index] {
            index -= 1;
        } else if index + 1 < bins && value >= self.edges[index + 1] {
            index += 1;
        }
        self.counts[index] += 1;
    }
}

/// Equal-width bins between the lowest and highest price.
pub fn price_histogram(properties: &[Property], bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(PropertyError::validation("bins", "must be at least 1"));
    }
    let prices: Vec<f64> = properties.iter().map(|p| p.price).collect();
    let Some((min, max)) = bounds(&prices) else {
        return Ok(Histogram::default());
    };

    let (lo, hi) = if min == max {
        // half a unit, or enough to move a value too large for that
        let half = 0.5_f64.max(min.abs() * f64::EPSILON);
        (min - half, (max + half).min(f64::MAX))
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
    edges.push(hi);

    let mut histogram = Histogram {
        edges,
        counts: vec![0; bins],
    };
    for price in prices {
        histogram.count_into(price);
    }
    Ok(histogram)
}

/// Listings per bedroom count from 1 to 9; other counts are left out.
pub fn bedroom_histogram(properties: &[Property]) -> Histogram {
    let edges: Vec<f64> = BEDROOM_EDGES.map(f64::from).collect();
    let mut histogram = Histogram {
        counts: vec![0; edges.len() - 1],
        edges,
    };
    for property in properties {
        histogram.count_into(f64::from(property.bedrooms));
    }
    histogram
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::property;

    #[test]
    fn price_bins_span_min_to_max() {
        let props: Vec<Property> = [0.0, 10.0, 25.0, 50.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, &price)| property(i as i64, price, 1))
            .collect();
        let histogram = price_histogram(&props, 4).unwrap();
        assert_eq!(histogram.edges, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        // 25 and 50 open their bins; 100 falls in the closed last bin
        assert_eq!(histogram.counts, vec![2, 1, 1, 1]);
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn identical_prices_get_a_unit_bin() {
        let props = vec![property(1, 10.0, 1), property(2, 10.0, 1)];
        let histogram = price_histogram(&props, 1).unwrap();
        assert_eq!(histogram.edges, vec![9.5, 10.5]);
        assert_eq!(histogram.counts, vec![2]);
    }

    #[test]
    fn identical_large_prices_still_get_a_wide_bin() {
        let props = vec![property(1, 1.0e17, 1), property(2, 1.0e17, 1)];
        let histogram = price_histogram(&props, 3).unwrap();
        let (lo, hi) = (histogram.edges[0], *histogram.edges.last().unwrap());
        assert!(lo < 1.0e17 && 1.0e17 < hi);
        assert_eq!(histogram.total(), 2);

        let props = vec![property(1, f64::MAX, 1), property(2, f64::MAX, 1)];
        let histogram = price_histogram(&props, 1).unwrap();
        assert!(histogram.edges[0] < histogram.edges[1]);
        assert_eq!(histogram.counts, vec![2]);
    }

    #[test]
    fn empty_and_zero_bins() {
        assert_eq!(price_histogram(&[], 50).unwrap(), Histogram::default());
        assert!(price_histogram(&[property(1, 1.0, 1)], 0).is_err());
    }

    #[test]
    fn bedrooms_outside_one_to_nine_are_ignored() {
        let props: Vec<Property> = [0, 1, 1, 3, 8, 9, 12]
            .iter()
            .enumerate()
            .map(|(i, &bedrooms)| {
                let mut p = property(i as i64, 1.0, 1);
                p.bedrooms = bedrooms;
                p
            })
            .collect();
        let histogram = bedroom_histogram(&props);
        assert_eq!(histogram.edges.len(), 9);
        assert_eq!(histogram.counts, vec![2, 0, 1, 0, 0, 0, 0, 2]);
    }
}
