// src/pipeline/publish.rs

//! Station publishing pipeline.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, IndexEntry, PublishedIndex, StationResult};
use crate::normalize::normalize_table;
use crate::services::StationSource;
use crate::storage::StationStorage;

/// Summary of a publishing run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub station_count: usize,
    pub failed_stations: Vec<String>,
    pub record_count: usize,
}

/// Fetch, normalize and publish every configured station, then the index.
///
/// Stations are processed one at a time in configuration order. A station
/// whose fetch fails is published with no records; storage errors abort the
/// run.
pub async fn run_publisher(
    config: &Config,
    source: &dyn StationSource,
    storage: &dyn StationStorage,
) -> Result<RunSummary> {
    let mut summary = RunSummary {
        station_count: config.stations.len(),
        ..RunSummary::default()
    };
    let mut entries = Vec::with_capacity(config.stations.len());

    for station in &config.stations {
        log::info!("Fetching station {}...", station.id);

        let records = match source.fetch(station).await {
            Ok(text) => normalize_table(&text),
            Err(e) => {
                log::error!("Error fetching station {}: {}", station.id, e);
                summary.failed_stations.push(station.id.clone());
                Vec::new()
            }
        };

        let result = StationResult::new(&station.id, Utc::now(), records);
        let location = storage.write_station(station, &result).await?;
        log::info!("Wrote {} ({} rows)", location, result.count);

        entries.push(IndexEntry {
            id: station.id.clone(),
            url: config.output.index_url(station),
            count: result.count,
        });
    }

    let index = PublishedIndex::new(Utc::now(), entries);
    summary.record_count = index.record_count();
    let location = storage.write_index(&index).await?;
    log::info!("Wrote stations index: {}", location);

    if summary.failed_stations.is_empty() {
        log::info!(
            "Published {} stations with {} records",
            summary.station_count,
            summary.record_count
        );
    } else {
        log::warn!(
            "Published {} stations with {} records ({} failed: {})",
            summary.station_count,
            summary.record_count,
            summary.failed_stations.len(),
            summary.failed_stations.join(", ")
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::error::AppError;
    use crate::models::{OutputConfig, StationInfo};
    use crate::storage::LocalStorage;

    /// In-memory source; stations without a body fail to fetch.
    struct FakeSource {
        bodies: HashMap<String, String>,
    }

    impl FakeSource {
        fn new(bodies: &[(&str, &str)]) -> Self {
            Self {
                bodies: bodies
                    .iter()
                    .map(|(id, body)| (id.to_string(), body.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl StationSource for FakeSource {
        async fn fetch(&self, station: &StationInfo) -> Result<String> {
            self.bodies
                .get(&station.id)
                .cloned()
                .ok_or_else(|| AppError::fetch(&station.id, "HTTP status 500"))
        }
    }

    fn config_for(root: &std::path::Path, ids: &[&str]) -> Config {
        Config {
            output: OutputConfig {
                root_dir: root.to_path_buf(),
                ..OutputConfig::default()
            },
            stations: ids.iter().map(|id| StationInfo::new(*id)).collect(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_publishes_stations_and_index() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path(), &["140", "130"]);
        let storage = LocalStorage::new(config.output.clone());
        let source = FakeSource::new(&[
            ("140", "Datum;Wert\n03.01.1975;-\n02.01.1975;12,5\ninvalid;99\n"),
            ("130", "Datum,Wert\n01.01.2000,1\n"),
        ]);

        let summary = run_publisher(&config, &source, &storage).await.unwrap();
        assert_eq!(summary.station_count, 2);
        assert_eq!(summary.record_count, 3);
        assert!(summary.failed_stations.is_empty());

        let station = storage
            .load_station(&StationInfo::new("140"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(station.count, 2);
        assert_eq!(station.records[0].value, Some(12.5));
        assert_eq!(station.records[1].value, None);
        assert!(station.records[0].time < station.records[1].time);

        let index = storage.load_index().await.unwrap().unwrap();
        let ids: Vec<_> = index.stations.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["140", "130"]);
        assert_eq!(index.stations[0].url, "./stations/140.json");
        assert_eq!(index.stations[1].count, 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_publishes_empty_station() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path(), &["140", "999", "130"]);
        let storage = LocalStorage::new(config.output.clone());
        let source = FakeSource::new(&[
            ("140", "Datum;Wert\n02.01.1975;1\n"),
            ("130", "Datum;Wert\n02.01.1975;2\n"),
        ]);

        let summary = run_publisher(&config, &source, &storage).await.unwrap();
        assert_eq!(summary.failed_stations, vec!["999".to_string()]);
        assert_eq!(summary.record_count, 2);

        let failed = storage
            .load_station(&StationInfo::new("999"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(failed.count, 0);
        assert!(failed.records.is_empty());

        let later = storage
            .load_station(&StationInfo::new("130"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(later.count, 1);

        let index = storage.load_index().await.unwrap().unwrap();
        let counts: Vec<_> = index.stations.iter().map(|e| e.count).collect();
        assert_eq!(counts, [1, 0, 1]);
    }

    #[tokio::test]
    async fn test_empty_export_is_not_a_failure() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(tmp.path(), &["140"]);
        let storage = LocalStorage::new(config.output.clone());
        let source = FakeSource::new(&[("140", "")]);

        let summary = run_publisher(&config, &source, &storage).await.unwrap();
        assert!(summary.failed_stations.is_empty());
        assert_eq!(summary.record_count, 0);
    }
}
