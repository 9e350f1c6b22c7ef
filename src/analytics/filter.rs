//! Filter predicate over property records.

use crate::models::{FilterCriteria, Property};

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.price_min.is_none()
            && self.price_max.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.city.is_none()
    }

    /// True iff the record satisfies every constraint that is present.
    pub fn matches(&self, property: &Property) -> bool {
        self.price_min.map_or(true, |min| property.price >= min)
            && self.price_max.map_or(true, |max| property.price <= max)
            && self.bedrooms.map_or(true, |n| property.bedrooms == n)
            && self.bathrooms.map_or(true, |n| property.bathrooms == n)
            && self
                .city
                .as_deref()
                .map_or(true, |city| property.city == city)
    }

    /// Borrowing closure form, handed to the store's `find`.
    pub fn predicate(&self) -> impl Fn(&Property) -> bool + Send + Sync + '_ {
        move |property| self.matches(property)
    }
}
