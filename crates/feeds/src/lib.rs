//! Upstream currency rate feed access.
//!
//! This crate provides:
//! - `RateSource` trait for current pair quotes
//! - REST client for the feed's listing endpoint
//! - Pair resolution with inverse-orientation fallback

pub mod error;
pub mod rest;
pub mod source;

pub use error::FeedError;
pub use rest::{resolve_pair, RateEntry, RestRateSource};
pub use source::RateSource;
