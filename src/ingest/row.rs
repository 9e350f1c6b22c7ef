use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PropertyError, Result};
use crate::models::Property;

/// One untyped input row, keyed by column name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
    /// Set when the row could not be split into its columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    defect: Option<String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Mark the row as structurally broken; it is rejected whatever its values.
    pub fn with_defect(mut self, reason: impl Into<String>) -> Self {
        self.defect = Some(reason.into());
        self
    }

    pub fn defect(&self) -> Option<&str> {
        self.defect.as_deref()
    }

    /// Trimmed value, `None` when missing or blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            defect: None,
        }
    }
}

/// Outcome of typing a raw row: a checked record or the first field error.
pub type ParsedRow = Result<Property>;

/// Coerce every column to its target type and check the record invariants.
///
/// A missing `date_listed` is filled with `listed_at`.
pub fn parse_row(row: &RawRow, listed_at: DateTime<Utc>) -> ParsedRow {
    if let Some(defect) = row.defect() {
        return Err(PropertyError::validation("row", defect));
    }
    let property = Property {
        property_id: parse_number(row, "property_id")?,
        address: required(row, "address")?.to_string(),
        city: required(row, "city")?.to_string(),
        state: required(row, "state")?.to_string(),
        zip_code: required(row, "zip_code")?.to_string(),
        price: parse_number(row, "price")?,
        bedrooms: parse_count(row, "bedrooms")?,
        bathrooms: parse_number(row, "bathrooms")?,
        square_feet: parse_count(row, "square_feet")?,
        date_listed: match row.get("date_listed") {
            Some(raw) => parse_timestamp(raw)?,
            None => listed_at,
        },
    };
    property.validate()?;
    Ok(property)
}

fn required<'a>(row: &'a RawRow, column: &str) -> Result<&'a str> {
    row.get(column)
        .ok_or_else(|| PropertyError::validation(column, "is required"))
}

fn parse_number<T: FromStr>(row: &RawRow, column: &str) -> Result<T> {
    let raw = required(row, column)?;
    raw.parse()
        .map_err(|_| PropertyError::validation(column, format!("'{raw}' is not a valid number")))
}

/// Whole, non-negative counts. Negative input is reported as such rather
/// than as a parse failure.
fn parse_count(row: &RawRow, column: &str) -> Result<u32> {
    let value: i64 = parse_number(row, column)?;
    if value < 0 {
        return Err(PropertyError::validation(
            column,
            format!("must be non-negative, got {value}"),
        ));
    }
    u32::try_from(value)
        .map_err(|_| PropertyError::validation(column, format!("{value} is out of range")))
}

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// RFC 3339, a naive timestamp taken as UTC, or a bare date at midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            PropertyError::validation("date_listed", format!("'{raw}' is not a valid timestamp"))
        })
}
