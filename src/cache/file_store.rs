//! JSON file store for the cached feed
//!
//! Persists the current generation to a single JSON file in the XDG cache
//! directory. Writes go to a sibling temp file first and are renamed into place,
//! so readers only ever see a complete generation.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::store::{CachedFeed, FeedStore, LocalFeedRecord};
use crate::error::ClientError;

/// File name of the cached generation inside the cache directory
pub const CACHE_FILE_NAME: &str = "feed.json";

/// Wrapper struct for the generation stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// When the batch was written
    timestamp: DateTime<Utc>,
    /// The cached records
    feed: Vec<LocalFeedRecord>,
}

/// Stores the cached feed as JSON on disk
///
/// Uses `~/.cache/cryptofeed/feed.json` on Linux, or the equivalent platform
/// cache directory elsewhere.
#[derive(Debug, Clone)]
pub struct FileFeedStore {
    /// Directory where the cache file is stored
    cache_dir: PathBuf,
}

impl FileFeedStore {
    /// Creates a store in the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home
    /// directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "cryptofeed")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a store in a custom directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory holding the cache file
    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE_NAME)
    }

    fn temp_path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.tmp", CACHE_FILE_NAME))
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn delete_cache(&self) -> Result<(), ClientError> {
        match fs::remove_file(self.cache_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedRecord>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        if let Some(record) = feed.iter().find(|record| !is_finite(record)) {
            return Err(ClientError::InvalidData(format!(
                "record {} has a non-finite price",
                record.id
            )));
        }

        fs::create_dir_all(&self.cache_dir).await?;

        let entry = CacheEntry { timestamp, feed };
        let json = serde_json::to_string_pretty(&entry)?;

        let temp = self.temp_path();
        fs::write(&temp, json).await?;
        fs::rename(&temp, self.cache_path()).await?;

        debug!(
            path = %self.cache_path().display(),
            count = entry.feed.len(),
            "cache written"
        );
        Ok(())
    }

    async fn load(&self) -> Result<Option<CachedFeed>, ClientError> {
        let content = match fs::read_to_string(self.cache_path()).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = serde_json::from_str(&content)?;

        Ok(Some(CachedFeed {
            feed: entry.feed,
            timestamp: entry.timestamp,
        }))
    }
}

/// JSON has no representation for NaN or infinities
fn is_finite(record: &LocalFeedRecord) -> bool {
    record.price_usd.is_finite() && record.change_pct_day_usd.is_finite()
}
