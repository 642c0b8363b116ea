//! Cache-first feed loading with remote fallback
//!
//! [`FeedRepository`] combines the remote and local loaders: serve the cache
//! while it is fresh, otherwise fetch and re-save.

use tracing::{debug, warn};

use crate::cache::{LocalFeedLoader, SaveResult};
use crate::data::{RemoteFeedLoader, SyncOutcome};

/// Keeps the local cache in step with the remote feed
#[derive(Clone)]
pub struct FeedRepository {
    remote: RemoteFeedLoader,
    local: LocalFeedLoader,
}

impl FeedRepository {
    pub fn new(remote: RemoteFeedLoader, local: LocalFeedLoader) -> Self {
        Self { remote, local }
    }

    /// Serves fresh cached records, falling back to [`FeedRepository::refresh`]
    ///
    /// An empty, stale or unreadable cache all lead to a remote fetch.
    pub async fn load(&self) -> SyncOutcome {
        match self.local.load_data().await {
            Ok(feed) if !feed.is_empty() => Ok(feed),
            Ok(_) => {
                debug!("no fresh cache, loading from remote");
                self.refresh().await
            }
            Err(kind) => {
                debug!(?kind, "cache unavailable, loading from remote");
                self.refresh().await
            }
        }
    }

    /// Fetches from remote and saves the result as the new cache generation
    ///
    /// A failed save is logged and does not fail the load.
    pub async fn refresh(&self) -> SyncOutcome {
        let feed = self.remote.load().await?;

        if let Err(error) = self.local.save(&feed).await {
            warn!(%error, "failed to cache remote feed");
        }

        Ok(feed)
    }

    /// Serves the cache only, never touching the remote
    pub async fn load_offline(&self) -> SyncOutcome {
        self.local.load_data().await
    }

    /// Evicts the cache if it is stale or corrupt
    pub async fn validate_cache(&self) -> SaveResult {
        self.local.validate_cache().await
    }
}
