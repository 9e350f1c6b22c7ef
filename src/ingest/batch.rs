use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PropertyError;
use crate::ingest::row::{parse_row, RawRow};
use crate::models::Property;
use crate::store::RecordStore;

/// How accepted rows reach the store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Commit each valid row as it is checked; a bad row only loses itself.
    #[default]
    PerRow,
    /// Check the whole batch first and commit only if no row was rejected.
    AllOrNothing,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowRejection {
    /// 1-based position in the batch
    pub row_index: usize,
    pub reason: PropertyError,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ImportSummary {
    pub rows_processed: usize,
    pub rows_committed: usize,
    pub rejections: Vec<RowRejection>,
}

impl ImportSummary {
    fn reject(&mut self, row_index: usize, reason: PropertyError) {
        warn!("Rejected row {}: {}", row_index, reason);
        self.rejections.push(RowRejection { row_index, reason });
    }
}

/// Validate a batch of raw rows and commit the accepted ones.
///
/// Ids must be unique across the batch and the store. Every row failure is
/// reported in the summary; nothing here aborts the batch.
pub async fn import_rows(
    store: &dyn RecordStore,
    rows: &[RawRow],
    policy: CommitPolicy,
) -> ImportSummary {
    info!(
        "Importing {} rows into {} store ({:?})",
        rows.len(),
        store.store_name(),
        policy
    );

    let listed_at = Utc::now();
    let mut summary = ImportSummary {
        rows_processed: rows.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();
    let mut staged: Vec<(usize, Property)> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let row_index = i + 1;
        let property = match parse_row(row, listed_at) {
            Ok(property) => property,
            Err(err) => {
                summary.reject(row_index, err);
                continue;
            }
        };
        let property_id = property.property_id;
        if !seen.insert(property_id) {
            summary.reject(row_index, PropertyError::Conflict { property_id });
            continue;
        }

        match policy {
            CommitPolicy::PerRow => match store.insert(property).await {
                Ok(_) => summary.rows_committed += 1,
                Err(err) => summary.reject(row_index, err),
            },
            CommitPolicy::AllOrNothing => match store.get(property_id).await {
                Ok(_) => summary.reject(row_index, PropertyError::Conflict { property_id }),
                Err(PropertyError::NotFound { .. }) => staged.push((row_index, property)),
                Err(err) => summary.reject(row_index, err),
            },
        }
    }

    if policy == CommitPolicy::AllOrNothing {
        commit_staged(store, staged, &mut summary).await;
    }

    info!(
        "Import finished: {} of {} rows committed, {} rejected",
        summary.rows_committed,
        summary.rows_processed,
        summary.rejections.len()
    );
    summary
}

async fn commit_staged(
    store: &dyn RecordStore,
    staged: Vec<(usize, Property)>,
    summary: &mut ImportSummary,
) {
    if !summary.rejections.is_empty() {
        debug!("Discarding {} staged rows after rejections", staged.len());
        return;
    }
    if staged.is_empty() {
        return;
    }

    let (indices, properties): (Vec<usize>, Vec<Property>) = staged.into_iter().unzip();
    let ids: Vec<i64> = properties.iter().map(|p| p.property_id).collect();
    let count = properties.len();
    match store.insert_all(properties).await {
        Ok(()) => summary.rows_committed = count,
        // another writer took the id between validation and commit
        Err(PropertyError::Conflict { property_id }) => {
            let at = ids.iter().position(|&id| id == property_id).unwrap_or(0);
            summary.reject(indices[at], PropertyError::Conflict { property_id });
        }
        Err(err) => {
            for row_index in indices {
                summary.reject(row_index, err.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ingest::row::fixtures::springfield_row;
    use crate::models::fixtures::property;
    use crate::store::InMemoryStore;

    fn five_rows_with_bad_third() -> Vec<RawRow> {
        vec![
            springfield_row("1", "100"),
            springfield_row("2", "200"),
            springfield_row("3", "-300"),
            springfield_row("4", "400"),
            springfield_row("5", "500"),
        ]
    }

    #[tokio::test]
    async fn per_row_commits_the_valid_rows() {
        let store = InMemoryStore::new();
        let summary = import_rows(&store, &five_rows_with_bad_third(), CommitPolicy::PerRow).await;

        assert_eq!(summary.rows_processed, 5);
        assert_eq!(summary.rows_committed, 4);
        assert_eq!(summary.rejections.len(), 1);
        assert_eq!(summary.rejections[0].row_index, 3);
        assert_eq!(summary.rejections[0].reason.kind(), ErrorKind::Validation);
        assert_eq!(store.len().await, 4);
        assert!(store.get(3).await.is_err());
    }

    #[tokio::test]
    async fn duplicate_in_batch_rejects_second_occurrence() {
        let store = InMemoryStore::new();
        let rows = vec![springfield_row("7", "100"), springfield_row("7", "999")];
        let summary = import_rows(&store, &rows, CommitPolicy::PerRow).await;

        assert_eq!(summary.rows_committed, 1);
        assert_eq!(
            summary.rejections,
            vec![RowRejection {
                row_index: 2,
                reason: PropertyError::Conflict { property_id: 7 },
            }]
        );
        assert_eq!(store.get(7).await.unwrap().price, 100.0);
    }

    #[tokio::test]
    async fn id_already_in_store_conflicts() {
        let store = InMemoryStore::new();
        store.insert(property(1, 5.0, 5)).await.unwrap();
        let summary = import_rows(&store, &[springfield_row("1", "100")], CommitPolicy::PerRow).await;
        assert_eq!(summary.rows_committed, 0);
        assert_eq!(summary.rejections[0].reason.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn all_or_nothing_commits_nothing_on_any_rejection() {
        let store = InMemoryStore::new();
        store.insert(property(5, 5.0, 5)).await.unwrap();
        let summary =
            import_rows(&store, &five_rows_with_bad_third(), CommitPolicy::AllOrNothing).await;

        assert_eq!(summary.rows_processed, 5);
        assert_eq!(summary.rows_committed, 0);
        let rejected: Vec<(usize, ErrorKind)> = summary
            .rejections
            .iter()
            .map(|r| (r.row_index, r.reason.kind()))
            .collect();
        assert_eq!(
            rejected,
            vec![(3, ErrorKind::Validation), (5, ErrorKind::Conflict)]
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn all_or_nothing_commits_a_clean_batch() {
        let store = InMemoryStore::new();
        let rows = vec![springfield_row("1", "100"), springfield_row("2", "200")];
        let summary = import_rows(&store, &rows, CommitPolicy::AllOrNothing).await;
        assert_eq!(summary.rows_committed, 2);
        assert!(summary.rejections.is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn empty_batch() {
        let store = InMemoryStore::new();
        let summary = import_rows(&store, &[], CommitPolicy::PerRow).await;
        assert_eq!(summary, ImportSummary::default());
    }
}
