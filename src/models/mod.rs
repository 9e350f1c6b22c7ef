use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PropertyError, Result};

pub mod query;

pub use query::{DateRange, FilterCriteria, Pagination};

/// Core property record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    /// Caller-assigned, never changes after creation
    pub property_id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: u32,
    /// Half-baths are allowed, e.g. 1.5
    pub bathrooms: f64,
    pub square_feet: u32,
    pub date_listed: DateTime<Utc>,
}

impl Property {
    /// Check the invariants the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        non_negative("price", self.price)?;
        non_negative("bathrooms", self.bathrooms)?;
        Ok(())
    }

    pub fn fields(&self) -> PropertyFields {
        PropertyFields {
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            date_listed: self.date_listed,
        }
    }
}

/// Every property field except the id. An update replaces all of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyFields {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_feet: u32,
    pub date_listed: DateTime<Utc>,
}

impl PropertyFields {
    pub fn into_property(self, property_id: i64) -> Property {
        Property {
            property_id,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            date_listed: self.date_listed,
        }
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PropertyError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(PropertyError::validation(
            field,
            format!("must be non-negative, got {value}"),
        ));
    }
    Ok(())
}
