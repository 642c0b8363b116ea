//! Cache store port
//!
//! The store keeps at most one generation of feed records, stamped with a single
//! batch timestamp. Implementations classify their own faults.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// On-store representation of a feed record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalFeedRecord {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub image_url: String,
    pub price_usd: f64,
    pub change_pct_day_usd: f32,
}

/// One cache generation as returned by [`FeedStore::load`]
#[derive(Debug, Clone, PartialEq)]
pub struct CachedFeed {
    /// Records in insertion order
    pub feed: Vec<LocalFeedRecord>,
    /// Write time of the whole batch
    pub timestamp: DateTime<Utc>,
}

/// Persistent storage for the cached feed
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Removes every cached record. Deleting an empty store succeeds.
    async fn delete_cache(&self) -> Result<(), ClientError>;

    /// Stores `feed` as the current generation, stamped with `timestamp`
    async fn insert(
        &self,
        feed: Vec<LocalFeedRecord>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ClientError>;

    /// Returns the current generation, or `None` when nothing has been stored
    async fn load(&self) -> Result<Option<CachedFeed>, ClientError>;
}
