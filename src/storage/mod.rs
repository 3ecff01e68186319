//! Storage abstractions for published station files.
//!
//! ## Directory Structure
//!
//! ```text
//! public/
//! ├── stations.json         # Index of all configured stations
//! └── stations/             # One file per station
//!     ├── 130.json
//!     └── 140.json
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PublishedIndex, StationInfo, StationResult};

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for publishing backends.
#[async_trait]
pub trait StationStorage: Send + Sync {
    /// Write one station's result, returning where it was written.
    async fn write_station(&self, station: &StationInfo, result: &StationResult)
    -> Result<String>;

    /// Write the index, returning where it was written.
    async fn write_index(&self, index: &PublishedIndex) -> Result<String>;
}
