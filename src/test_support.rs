//! Spy ports shared by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::cache::{CachedFeed, FeedStore, LocalFeedRecord};
use crate::data::remote::{RemoteCoinInfo, RemoteRaw, RemoteUsd};
use crate::data::{FeedRecord, HttpClient, RemoteFeedItem, RemoteRootFeed};
use crate::error::ClientError;

/// Fetch port that returns a canned result and counts calls
pub struct SpyHttpClient {
    result: Result<RemoteRootFeed, ClientError>,
    calls: AtomicUsize,
}

impl SpyHttpClient {
    pub fn new(result: Result<RemoteRootFeed, ClientError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn get_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for SpyHttpClient {
    async fn get(&self) -> Result<RemoteRootFeed, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// A call received by [`SpyFeedStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreMessage {
    DeleteCache,
    Insert(Vec<LocalFeedRecord>, DateTime<Utc>),
    Load,
}

/// In-memory store that records every call and can be told to fail
#[derive(Default)]
pub struct SpyFeedStore {
    messages: Mutex<Vec<StoreMessage>>,
    stored: Mutex<Option<CachedFeed>>,
    delete_error: Option<ClientError>,
    insert_error: Option<ClientError>,
    load_error: Option<ClientError>,
}

impl SpyFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with one generation
    pub fn with_cached(feed: Vec<LocalFeedRecord>, timestamp: DateTime<Utc>) -> Self {
        let store = Self::default();
        *store.stored.lock().unwrap() = Some(CachedFeed { feed, timestamp });
        store
    }

    pub fn failing_delete(mut self, error: ClientError) -> Self {
        self.delete_error = Some(error);
        self
    }

    pub fn failing_insert(mut self, error: ClientError) -> Self {
        self.insert_error = Some(error);
        self
    }

    pub fn failing_load(mut self, error: ClientError) -> Self {
        self.load_error = Some(error);
        self
    }

    pub fn messages(&self) -> Vec<StoreMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Option<CachedFeed> {
        self.stored.lock().unwrap().clone()
    }

    fn record(&self, message: StoreMessage) {
        self.messages.lock().unwrap().push(message);
    }
}

#[async_trait]
impl FeedStore for SpyFeedStore {
    async fn delete_cache(&self) -> Result<(), ClientError> {
        self.record(StoreMessage::DeleteCache);
        if let Some(error) = &self.delete_error {
            return Err(error.clone());
        }
        *self.stored.lock().unwrap() = None;
        Ok(())
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedRecord>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        self.record(StoreMessage::Insert(feed.clone(), timestamp));
        if let Some(error) = &self.insert_error {
            return Err(error.clone());
        }
        *self.stored.lock().unwrap() = Some(CachedFeed { feed, timestamp });
        Ok(())
    }

    async fn load(&self) -> Result<Option<CachedFeed>, ClientError> {
        self.record(StoreMessage::Load);
        if let Some(error) = &self.load_error {
            return Err(error.clone());
        }
        Ok(self.stored())
    }
}

pub fn remote_item(
    id: &str,
    name: &str,
    full_name: &str,
    price: f64,
    change_pct_day: f32,
) -> RemoteFeedItem {
    RemoteFeedItem {
        coin_info: RemoteCoinInfo {
            id: id.to_string(),
            name: name.to_string(),
            full_name: full_name.to_string(),
            image_url: format!("/media/{}.png", id),
        },
        raw: RemoteRaw {
            usd: RemoteUsd {
                price,
                change_pct_day,
            },
        },
    }
}

/// A record with a fresh id and otherwise arbitrary values
pub fn unique_record(seed: u32) -> FeedRecord {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    FeedRecord {
        id: format!("coin-{}-{}", seed, nanos),
        name: format!("C{}", seed),
        full_name: format!("Coin number {}", seed),
        image_url: format!("https://example.com/img/{}.png", seed),
        price_usd: 1.5 * f64::from(seed) + 0.125,
        change_pct_day_usd: -0.5 * seed as f32,
    }
}

pub fn local_record(record: &FeedRecord) -> LocalFeedRecord {
    LocalFeedRecord {
        id: record.id.clone(),
        name: record.name.clone(),
        full_name: record.full_name.clone(),
        image_url: record.image_url.clone(),
        price_usd: record.price_usd,
        change_pct_day_usd: record.change_pct_day_usd,
    }
}
