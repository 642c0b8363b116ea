//! Crypto Feed Library
//!
//! Loads cryptocurrency price records from a remote feed or a local cache and
//! keeps the cache synchronized with a 24 hour freshness window.

pub mod cache;
pub mod cli;
pub mod data;
pub mod error;
pub mod logging;
pub mod sync;

#[cfg(test)]
mod test_support;
