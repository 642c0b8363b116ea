//! Cache module for keeping the last fetched feed on disk
//!
//! This module provides the store port, the operations that save and load the
//! cached feed with a 24 hour freshness window, and a JSON file store. A save
//! always replaces the whole generation; stale generations read as empty until
//! explicitly evicted.

mod file_store;
mod local;
pub mod policy;
mod store;

pub use file_store::{FileFeedStore, CACHE_FILE_NAME};
pub use local::{LocalFeedLoader, SaveResult};
pub use store::{CachedFeed, FeedStore, LocalFeedRecord};
