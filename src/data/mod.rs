//! Core data models for the crypto feed
//!
//! This module contains the canonical feed record handed to callers and the
//! remote side of the pipeline (fetch port, loader, HTTP adapter).

pub mod http;
pub mod remote;

pub use http::ReqwestHttpClient;
pub use remote::{HttpClient, RemoteFeedItem, RemoteFeedLoader, RemoteRootFeed};

use serde::Serialize;

use crate::error::FailureKind;

/// One cryptocurrency's identity and USD price snapshot
///
/// Identity is `id`. Records are produced by translating either a remote
/// payload item or a cached item and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedRecord {
    /// Unique identifier from the feed provider
    pub id: String,
    /// Ticker symbol (e.g. "BTC")
    pub name: String,
    /// Human-readable name (e.g. "Bitcoin")
    pub full_name: String,
    /// Logo location as provided by the feed
    pub image_url: String,
    /// Last price in USD
    pub price_usd: f64,
    /// Change over the current day in percent
    pub change_pct_day_usd: f32,
}

/// Result of a single load, either the records in source order or a failure kind
pub type SyncOutcome = Result<Vec<FeedRecord>, FailureKind>;
