//! Normalized measurement records and per-station results.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Original row cells keyed by header name, in header order.
///
/// Cells missing from a short row are stored as `null`.
pub type RawRow = Map<String, Value>;

/// One measurement parsed from a station export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Measurement time, timezone-naive
    pub time: NaiveDateTime,

    /// Parsed value; `None` for empty, placeholder or unparseable cells
    pub value: Option<f64>,

    /// Value cell text as read (trimmed)
    pub raw_value: String,

    /// The complete source row
    pub raw_row: RawRow,
}

/// Published result for a single station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationResult {
    /// Station id
    #[serde(rename = "station")]
    pub station_id: String,

    /// When the series was fetched
    pub fetched_at: DateTime<Utc>,

    /// Number of records
    pub count: usize,

    /// Records in ascending time order
    #[serde(rename = "data")]
    pub records: Vec<Record>,
}

impl StationResult {
    pub fn new(
        station_id: impl Into<String>,
        fetched_at: DateTime<Utc>,
        records: Vec<Record>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            fetched_at,
            count: records.len(),
            records,
        }
    }

    /// Result for a station whose fetch failed.
    pub fn empty(station_id: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self::new(station_id, fetched_at, Vec::new())
    }
}
