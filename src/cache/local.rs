//! Save and load of the cached feed
//!
//! [`LocalFeedLoader`] owns the cache contract on top of a [`FeedStore`]:
//! saving replaces the whole generation (delete, then insert), loading only
//! serves generations younger than the freshness window.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::policy;
use super::store::{FeedStore, LocalFeedRecord};
use crate::data::{FeedRecord, SyncOutcome};
use crate::error::{ClientError, FailureKind};

/// Result of a save: the first store fault, if any
pub type SaveResult = Result<(), ClientError>;

/// Cache operations over a [`FeedStore`]
///
/// `reference_time` is captured once at construction and is what every load
/// compares batch timestamps against. Construction performs no I/O.
#[derive(Clone)]
pub struct LocalFeedLoader {
    store: Arc<dyn FeedStore>,
    reference_time: DateTime<Utc>,
}

impl LocalFeedLoader {
    pub fn new(store: Arc<dyn FeedStore>, reference_time: DateTime<Utc>) -> Self {
        Self {
            store,
            reference_time,
        }
    }

    /// Replaces the cached generation with `feed`
    ///
    /// Deletes first and only inserts if the delete succeeded, stamping the
    /// batch with the current wall-clock time. Returns the first fault verbatim.
    /// Dropping the future before the delete resolves never reaches the insert.
    pub async fn save(&self, feed: &[FeedRecord]) -> SaveResult {
        if let Err(error) = self.store.delete_cache().await {
            warn!(%error, "cache delete failed, skipping insert");
            return Err(error);
        }

        let timestamp = Utc::now();
        debug!(count = feed.len(), %timestamp, "inserting feed into cache");
        self.store.insert(to_local(feed), timestamp).await
    }

    /// Loads the cached generation if it is still fresh
    ///
    /// # Returns
    /// * `Ok(records)` - the cached records, in stored order
    /// * `Ok(vec![])` - nothing cached, or the cached generation is stale
    /// * `Err(FailureKind)` - the classification of the store fault
    ///
    /// Stale data is reported as empty and left in place; eviction is
    /// [`LocalFeedLoader::validate_cache`]'s job.
    pub async fn load_data(&self) -> SyncOutcome {
        match self.store.load().await {
            Ok(Some(cached)) if policy::validate(cached.timestamp, self.reference_time) => {
                debug!(
                    count = cached.feed.len(),
                    timestamp = %cached.timestamp,
                    "serving cached feed"
                );
                Ok(to_models(cached.feed))
            }
            Ok(Some(cached)) => {
                debug!(timestamp = %cached.timestamp, "cached feed expired");
                Ok(Vec::new())
            }
            Ok(None) => {
                debug!("cache is empty");
                Ok(Vec::new())
            }
            Err(error) => {
                let kind = FailureKind::from(&error);
                warn!(%error, ?kind, "cache load failed");
                Err(kind)
            }
        }
    }

    /// Deletes the cache when it is stale or its content is corrupt
    ///
    /// Fresh or absent generations are left untouched. Other store faults are
    /// returned as is and leave the cache in place.
    pub async fn validate_cache(&self) -> SaveResult {
        let needs_delete = match self.store.load().await {
            Ok(Some(cached)) => !policy::validate(cached.timestamp, self.reference_time),
            Ok(None) => false,
            Err(error @ ClientError::InvalidData(_)) => {
                warn!(%error, "corrupt cache, deleting");
                true
            }
            Err(error) => {
                warn!(%error, "cache unavailable, keeping it");
                return Err(error);
            }
        };

        if needs_delete {
            debug!("evicting cached feed");
            self.store.delete_cache().await
        } else {
            Ok(())
        }
    }
}

fn to_local(feed: &[FeedRecord]) -> Vec<LocalFeedRecord> {
    feed.iter()
        .map(|record| LocalFeedRecord {
            id: record.id.clone(),
            name: record.name.clone(),
            full_name: record.full_name.clone(),
            image_url: record.image_url.clone(),
            price_usd: record.price_usd,
            change_pct_day_usd: record.change_pct_day_usd,
        })
        .collect()
}

fn to_models(feed: Vec<LocalFeedRecord>) -> Vec<FeedRecord> {
    feed.into_iter()
        .map(|local| FeedRecord {
            id: local.id,
            name: local.name,
            full_name: local.full_name,
            image_url: local.image_url,
            price_usd: local.price_usd,
            change_pct_day_usd: local.change_pct_day_usd,
        })
        .collect()
}
