//! Service layer for the publisher.
//!
//! - Station export fetching (`HttpFetcher`, behind `StationSource`)

mod fetcher;

pub use fetcher::{HttpFetcher, StationSource};
