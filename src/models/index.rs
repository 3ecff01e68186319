//! Summary index of published stations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Index entry pointing at one published station file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexEntry {
    /// Station id
    pub id: String,

    /// Station file path relative to the index file
    pub url: String,

    /// Number of records in the station file
    pub count: usize,
}

/// Index written once at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedIndex {
    /// Time the index was generated
    pub generated: DateTime<Utc>,

    /// One entry per configured station, in configuration order
    pub stations: Vec<IndexEntry>,
}

impl PublishedIndex {
    pub fn new(generated: DateTime<Utc>, stations: Vec<IndexEntry>) -> Self {
        Self {
            generated,
            stations,
        }
    }

    /// Total records across all stations.
    pub fn record_count(&self) -> usize {
        self.stations.iter().map(|s| s.count).sum()
    }
}
