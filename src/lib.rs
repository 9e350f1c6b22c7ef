//! Property analytics engine: filtering, summary statistics, IQR outliers,
//! monthly listing history and validated bulk import over a record store.

pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod service;
pub mod store;

pub use error::{ErrorKind, PropertyError, Result};
pub use models::{DateRange, FilterCriteria, Pagination, Property, PropertyFields};
pub use store::{InMemoryStore, RecordStore};
