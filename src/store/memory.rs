use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{PropertyError, Result};
use crate::models::{Property, PropertyFields};
use crate::store::traits::{Predicate, RecordStore};

/// Record store kept in process memory.
///
/// A single `RwLock` gives snapshot reads and one writer at a time, which
/// is what makes insert-if-absent atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<BTreeMap<i64, Property>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find(&self, predicate: Predicate<'_>) -> Result<Vec<Property>> {
        let records = self.records.read().await;
        Ok(records.values().filter(|&p| predicate(p)).cloned().collect())
    }

    async fn get(&self, property_id: i64) -> Result<Property> {
        self.records
            .read()
            .await
            .get(&property_id)
            .cloned()
            .ok_or(PropertyError::NotFound { property_id })
    }

    async fn insert(&self, property: Property) -> Result<Property> {
        let mut records = self.records.write().await;
        if records.contains_key(&property.property_id) {
            return Err(PropertyError::Conflict {
                property_id: property.property_id,
            });
        }
        debug!("Inserting property {}", property.property_id);
        records.insert(property.property_id, property.clone());
        Ok(property)
    }

    async fn insert_all(&self, properties: Vec<Property>) -> Result<()> {
        let mut records = self.records.write().await;
        let mut seen = HashSet::with_capacity(properties.len());
        for property in &properties {
            let id = property.property_id;
            if records.contains_key(&id) || !seen.insert(id) {
                return Err(PropertyError::Conflict { property_id: id });
            }
        }
        debug!("Inserting batch of {} properties", properties.len());
        records.extend(properties.into_iter().map(|p| (p.property_id, p)));
        Ok(())
    }

    async fn update(&self, property_id: i64, fields: PropertyFields) -> Result<Property> {
        let mut records = self.records.write().await;
        let slot = records
            .get_mut(&property_id)
            .ok_or(PropertyError::NotFound { property_id })?;
        *slot = fields.into_property(property_id);
        Ok(slot.clone())
    }

    async fn delete(&self, property_id: i64) -> Result<Property> {
        self.records
            .write()
            .await
            .remove(&property_id)
            .ok_or(PropertyError::NotFound { property_id })
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
