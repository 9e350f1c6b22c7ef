//! Operations over a record store handle.
//!
//! Each call fetches its working set through the given store and hands it to
//! the pure functions in [`crate::analytics`]. Dropping a returned future
//! abandons the work; no partial result is ever produced.

use tracing::{debug, info};

use crate::analytics::{self, Histogram, HistoricalInsight, PropertyStatistics};
use crate::error::Result;
use crate::models::{DateRange, FilterCriteria, Pagination, Property, PropertyFields};
use crate::store::RecordStore;

pub async fn create_property(store: &dyn RecordStore, property: Property) -> Result<Property> {
    property.validate()?;
    let created = store.insert(property).await?;
    info!("Created property {}", created.property_id);
    Ok(created)
}

pub async fn get_property(store: &dyn RecordStore, property_id: i64) -> Result<Property> {
    store.get(property_id).await
}

/// Matching records ordered by id, then paginated.
pub async fn list_properties(
    store: &dyn RecordStore,
    criteria: &FilterCriteria,
    page: Pagination,
) -> Result<Vec<Property>> {
    Ok(page.apply(matching(store, criteria).await?))
}

/// Replace every field except the id.
pub async fn update_property(
    store: &dyn RecordStore,
    property_id: i64,
    fields: PropertyFields,
) -> Result<Property> {
    fields.clone().into_property(property_id).validate()?;
    let updated = store.update(property_id, fields).await?;
    info!("Updated property {}", property_id);
    Ok(updated)
}

pub async fn delete_property(store: &dyn RecordStore, property_id: i64) -> Result<Property> {
    let removed = store.delete(property_id).await?;
    info!("Deleted property {}", property_id);
    Ok(removed)
}

pub async fn property_statistics(
    store: &dyn RecordStore,
    criteria: &FilterCriteria,
) -> Result<PropertyStatistics> {
    let properties = matching(store, criteria).await?;
    Ok(analytics::compute_statistics(&properties))
}

pub async fn property_outliers(
    store: &dyn RecordStore,
    criteria: &FilterCriteria,
    factor: f64,
    page: Pagination,
) -> Result<Vec<Property>> {
    let properties = matching(store, criteria).await?;
    analytics::detect_outliers(&properties, factor, page)
}

/// Monthly listing history over the whole store, within `range`.
pub async fn listing_history(
    store: &dyn RecordStore,
    range: &DateRange,
) -> Result<Vec<HistoricalInsight>> {
    let properties = store.find(&|p: &Property| range.contains(&p.date_listed)).await?;
    Ok(analytics::historical_insights(&properties, range))
}

pub async fn price_distribution(
    store: &dyn RecordStore,
    criteria: &FilterCriteria,
    bins: usize,
) -> Result<Histogram> {
    let properties = matching(store, criteria).await?;
    analytics::price_histogram(&properties, bins)
}

pub async fn bedroom_distribution(
    store: &dyn RecordStore,
    criteria: &FilterCriteria,
) -> Result<Histogram> {
    let properties = matching(store, criteria).await?;
    Ok(analytics::bedroom_histogram(&properties))
}

async fn matching(store: &dyn RecordStore, criteria: &FilterCriteria) -> Result<Vec<Property>> {
    let predicate = criteria.predicate();
    let properties = store.find(&predicate).await?;
    debug!(
        "{} properties matched {:?} in {} store",
        properties.len(),
        criteria,
        store.store_name()
    );
    Ok(properties)
}
