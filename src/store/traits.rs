use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Property, PropertyFields};

pub type Predicate<'a> = &'a (dyn Fn(&Property) -> bool + Send + Sync);

/// Durable keyed storage for property records.
///
/// Implementations must return a consistent snapshot from `find` and
/// serialize id uniqueness checks, so two concurrent inserts of the same
/// id cannot both succeed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All matching records, ordered by `property_id` ascending.
    async fn find(&self, predicate: Predicate<'_>) -> Result<Vec<Property>>;

    async fn get(&self, property_id: i64) -> Result<Property>;

    /// Fails with `Conflict` when the id is taken.
    async fn insert(&self, property: Property) -> Result<Property>;

    /// Inserts every record or none of them.
    async fn insert_all(&self, properties: Vec<Property>) -> Result<()>;

    async fn update(&self, property_id: i64, fields: PropertyFields) -> Result<Property>;

    async fn delete(&self, property_id: i64) -> Result<Property>;

    /// Name of the backing store, for logs
    fn store_name(&self) -> &'static str;
}
