use serde::{Deserialize, Serialize};

use crate::analytics::sorted_prices;
use crate::models::Property;

/// Summary statistics over a filtered record set.
///
/// An empty input yields all zeros.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyStatistics {
    pub total_properties: usize,
    pub average_price: f64,
    pub median_price: f64,
    /// Mean of per-record `price / square_feet`, skipping zero-area records
    pub average_price_per_sqft: f64,
}

pub fn compute_statistics(properties: &[Property]) -> PropertyStatistics {
    if properties.is_empty() {
        return PropertyStatistics::default();
    }

    let total_properties = properties.len();
    let prices: Vec<f64> = properties.iter().map(|p| p.price).collect();
    let average_price = mean(&prices);

    let ratios: Vec<f64> = properties
        .iter()
        .filter(|p| p.square_feet > 0)
        .map(|p| p.price / f64::from(p.square_feet))
        .collect();
    let average_price_per_sqft = mean(&ratios);

    PropertyStatistics {
        total_properties,
        average_price,
        median_price: median(&sorted_prices(properties)),
        average_price_per_sqft,
    }
}

/// Arithmetic mean; zero when empty. Finite inputs give a finite mean even
/// when their sum overflows.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

/// Median of an ascending slice; zero when empty.
pub(crate) fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => {
            let (a, b) = (sorted[n / 2 - 1], sorted[n / 2]);
            a + (b - a) / 2.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::property;

    fn priced(prices: &[f64]) -> Vec<Property> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| property(i as i64, price, 100))
            .collect()
    }

    #[test]
    fn even_count_mean_and_median() {
        let stats = compute_statistics(&priced(&[400.0, 100.0, 300.0, 200.0]));
        assert_eq!(stats.total_properties, 4);
        assert_eq!(stats.average_price, 250.0);
        assert_eq!(stats.median_price, 250.0);
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        let stats = compute_statistics(&priced(&[300.0, 100.0, 200.0]));
        assert_eq!(stats.median_price, 200.0);
    }

    #[test]
    fn price_per_sqft_is_mean_of_ratios() {
        let props = vec![property(1, 100.0, 100), property(2, 400.0, 100)];
        // ratios 1.0 and 4.0; ratio of means would give the same here, so skew the areas
        assert_eq!(compute_statistics(&props).average_price_per_sqft, 2.5);

        let props = vec![property(1, 100.0, 50), property(2, 100.0, 200)];
        // 2.0 and 0.5 -> 1.25 (ratio of means would be 0.8)
        assert_eq!(compute_statistics(&props).average_price_per_sqft, 1.25);
    }

    #[test]
    fn zero_area_is_counted_but_not_averaged() {
        let props = vec![property(1, 1000.0, 0), property(2, 300.0, 100)];
        let stats = compute_statistics(&props);
        assert_eq!(stats.total_properties, 2);
        assert_eq!(stats.average_price_per_sqft, 3.0);
        assert_eq!(stats.average_price, 650.0);
    }

    #[test]
    fn all_zero_area_gives_zero_ratio() {
        let stats = compute_statistics(&[property(1, 1000.0, 0)]);
        assert_eq!(stats.average_price_per_sqft, 0.0);
        assert!(!stats.average_price_per_sqft.is_nan());
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(compute_statistics(&[]), PropertyStatistics::default());
    }

    #[test]
    fn largest_finite_prices_do_not_overflow() {
        let stats = compute_statistics(&priced(&[f64::MAX, f64::MAX]));
        assert_eq!(stats.average_price, f64::MAX);
        assert_eq!(stats.median_price, f64::MAX);
        assert!(stats.average_price_per_sqft.is_finite());

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["average_price"].is_f64());
        assert!(json["median_price"].is_f64());
    }

    #[test]
    fn mean_falls_back_when_the_sum_overflows() {
        assert_eq!(mean(&[f64::MAX, f64::MAX, 0.0, 0.0]), f64::MAX / 2.0);
        assert_eq!(mean(&[1.0, 2.0]), 1.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn order_does_not_matter() {
        let a = compute_statistics(&priced(&[5.0, 1.0, 9.0, 3.0]));
        let b = compute_statistics(&priced(&[9.0, 3.0, 1.0, 5.0]));
        assert_eq!(a, b);
    }
}
