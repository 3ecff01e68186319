// src/models/mod.rs

//! Domain models for the publisher.
//!
//! Configuration, normalized records and the published index.

mod config;
mod index;
mod record;

// Re-export all public types
pub use config::{
    Config, ExportForm, FetcherConfig, OutputConfig, STATION_PLACEHOLDER, StationInfo,
};
pub use index::{IndexEntry, PublishedIndex};
pub use record::{RawRow, Record, StationResult};
