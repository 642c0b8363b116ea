//! Freshness window for cached feeds

use chrono::{DateTime, Duration, Utc};

/// Maximum age of a cache generation that may still be served, in hours
pub const MAX_CACHE_AGE_HOURS: i64 = 24;

/// Returns `true` when a batch written at `timestamp` is still fresh at `against`
///
/// Fresh means strictly younger than [`MAX_CACHE_AGE_HOURS`]. A timestamp in
/// the future of `against` counts as fresh.
pub fn validate(timestamp: DateTime<Utc>, against: DateTime<Utc>) -> bool {
    against.signed_duration_since(timestamp) < Duration::hours(MAX_CACHE_AGE_HOURS)
}
