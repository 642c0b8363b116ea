//! Remote side of the feed pipeline
//!
//! [`HttpClient`] is the fetch port: one call, one outcome. [`RemoteFeedLoader`]
//! drives it and translates the raw payload and fault categories into domain
//! values.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{FeedRecord, SyncOutcome};
use crate::error::{ClientError, FailureKind};

/// Raw feed payload as returned by the feed provider
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteRootFeed {
    #[serde(rename = "Data", default)]
    pub data: Vec<RemoteFeedItem>,
}

/// A single entry of the raw payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteFeedItem {
    #[serde(rename = "CoinInfo")]
    pub coin_info: RemoteCoinInfo,
    #[serde(rename = "RAW")]
    pub raw: RemoteRaw,
}

/// Coin identity block of a payload entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteCoinInfo {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "ImageUrl")]
    pub image_url: String,
}

/// Raw market data block of a payload entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteRaw {
    #[serde(rename = "USD")]
    pub usd: RemoteUsd,
}

/// USD quote of a payload entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteUsd {
    #[serde(rename = "PRICE")]
    pub price: f64,
    #[serde(rename = "CHANGEPCTDAY")]
    pub change_pct_day: f32,
}

/// Capability to request the raw feed once
///
/// Implementations own transport concerns (timeouts, TLS, connection reuse)
/// and classify their faults into a [`ClientError`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self) -> Result<RemoteRootFeed, ClientError>;
}

/// Loads the feed from the remote port
///
/// Construction performs no I/O. Every call to [`RemoteFeedLoader::load`] issues
/// exactly one request; nothing is cached or retried here.
#[derive(Clone)]
pub struct RemoteFeedLoader {
    client: Arc<dyn HttpClient>,
}

impl RemoteFeedLoader {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Fetches the feed and translates the outcome
    ///
    /// # Returns
    /// * `Ok(records)` - one record per payload item, in payload order
    /// * `Err(FailureKind)` - the classification of the transport fault
    pub async fn load(&self) -> SyncOutcome {
        debug!("requesting feed from remote");

        match self.client.get().await {
            Ok(root) => {
                let feed = to_models(root.data);
                debug!(count = feed.len(), "remote feed received");
                Ok(feed)
            }
            Err(error) => {
                let kind = FailureKind::from(&error);
                warn!(%error, ?kind, "remote feed request failed");
                Err(kind)
            }
        }
    }
}

fn to_models(items: Vec<RemoteFeedItem>) -> Vec<FeedRecord> {
    items
        .into_iter()
        .map(|item| FeedRecord {
            id: item.coin_info.id,
            name: item.coin_info.name,
            full_name: item.coin_info.full_name,
            image_url: item.coin_info.image_url,
            price_usd: item.raw.usd.price,
            change_pct_day_usd: item.raw.usd.change_pct_day,
        })
        .collect()
}
