//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Placeholder replaced by the station id in [`FetcherConfig::url_template`].
pub const STATION_PLACEHOLDER: &str = "{station}";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP request settings for the station portal
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Where published files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Stations to publish, in index order
    #[serde(default = "defaults::stations")]
    pub stations: Vec<StationInfo>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if !self.fetcher.url_template.contains(STATION_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "fetcher.url_template must contain {STATION_PLACEHOLDER}"
            )));
        }
        if self.stations.is_empty() {
            return Err(AppError::validation("No stations defined"));
        }

        let mut seen = HashSet::new();
        for station in &self.stations {
            if station.id.trim().is_empty() {
                return Err(AppError::validation("Station id is empty"));
            }
            if !seen.insert(station.id.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate station id: {}",
                    station.id
                )));
            }

            let filename = station.filename();
            if !filename.ends_with(".json") || filename.contains(['/', '\\']) {
                return Err(AppError::validation(format!(
                    "Invalid filename for station {}: {}",
                    station.id, filename
                )));
            }

            url::Url::parse(&self.fetcher.station_url(&station.id))?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            output: OutputConfig::default(),
            stations: defaults::stations(),
        }
    }
}

/// HTTP settings for the station export endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Station export URL, `{station}` is replaced by the station id
    #[serde(default = "defaults::url_template")]
    pub url_template: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Origin header sent with the export form
    #[serde(default = "defaults::portal_root")]
    pub origin: String,

    /// Referer header sent with the export form
    #[serde(default = "defaults::portal_referer")]
    pub referer: String,

    /// Export form fields
    #[serde(default)]
    pub form: ExportForm,
}

impl FetcherConfig {
    /// Build the export URL for a station.
    pub fn station_url(&self, station_id: &str) -> String {
        self.url_template.replace(STATION_PLACEHOLDER, station_id)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url_template: defaults::url_template(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            origin: defaults::portal_root(),
            referer: defaults::portal_referer(),
            form: ExportForm::default(),
        }
    }
}

/// Fixed fields of the portal's CSV export form.
///
/// The end date is not configurable: it is always the day of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportForm {
    /// Series type (`sreihe`)
    #[serde(default = "defaults::series")]
    pub series: String,

    /// Export mode (`smode`)
    #[serde(default = "defaults::mode")]
    pub mode: String,

    /// First day of the series, `dd.mm.yyyy` (`sdatum`)
    #[serde(default = "defaults::start_date")]
    pub start_date: String,

    /// Export topic (`exportthema`)
    #[serde(default = "defaults::export_theme")]
    pub export_theme: String,
}

impl Default for ExportForm {
    fn default() -> Self {
        Self {
            series: defaults::series(),
            mode: defaults::mode(),
            start_date: defaults::start_date(),
            export_theme: defaults::export_theme(),
        }
    }
}

/// Output layout for published files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory of the published tree
    #[serde(default = "defaults::root_dir")]
    pub root_dir: PathBuf,

    /// Directory for per-station files, relative to `root_dir`
    #[serde(default = "defaults::stations_dir")]
    pub stations_dir: String,

    /// Index file name, relative to `root_dir`
    #[serde(default = "defaults::index_file")]
    pub index_file: String,
}

impl OutputConfig {
    /// Storage key of a station file, relative to `root_dir`.
    pub fn station_key(&self, station: &StationInfo) -> String {
        let dir = self.stations_dir.trim_matches('/');
        if dir.is_empty() {
            station.filename()
        } else {
            format!("{}/{}", dir, station.filename())
        }
    }

    /// Path of a station file relative to the index file's directory.
    pub fn index_url(&self, station: &StationInfo) -> String {
        let index_dir: Vec<&str> = match self.index_file.rsplit_once('/') {
            Some((dir, _)) => dir.split('/').filter(|c| !c.is_empty()).collect(),
            None => Vec::new(),
        };
        let key = self.station_key(station);
        let target: Vec<&str> = key.split('/').filter(|c| !c.is_empty()).collect();

        let shared = index_dir
            .iter()
            .zip(target.iter().take(target.len().saturating_sub(1)))
            .take_while(|(a, b)| a == b)
            .count();
        let ups = index_dir.len() - shared;
        let rest = target[shared..].join("/");

        if ups == 0 {
            format!("./{rest}")
        } else {
            format!("{}{rest}", "../".repeat(ups))
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: defaults::root_dir(),
            stations_dir: defaults::stations_dir(),
            index_file: defaults::index_file(),
        }
    }
}

/// A monitoring station to fetch and publish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationInfo {
    /// Portal station id (e.g., "140")
    pub id: String,

    /// Output file name; defaults to `<id>.json`
    #[serde(default)]
    pub filename: Option<String>,
}

impl StationInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: None,
        }
    }

    /// Output file name for this station.
    pub fn filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("{}.json", self.id))
    }
}

mod defaults {
    use std::path::PathBuf;

    use super::StationInfo;

    // Fetcher defaults
    pub fn url_template() -> String {
        "https://wasserportal.berlin.de/station.php?anzeige=d&station={station}&thema=opq&nstoffid=448&nstoffid2=0"
            .into()
    }
    pub fn user_agent() -> String {
        "github-actions-fetcher/1.0".into()
    }
    pub fn timeout() -> u64 {
        60
    }
    pub fn portal_root() -> String {
        "https://wasserportal.berlin.de".into()
    }
    pub fn portal_referer() -> String {
        "https://wasserportal.berlin.de/".into()
    }

    // Export form defaults
    pub fn series() -> String {
        "ew".into()
    }
    pub fn mode() -> String {
        "c".into()
    }
    pub fn start_date() -> String {
        "02.01.1975".into()
    }
    pub fn export_theme() -> String {
        "pq".into()
    }

    // Output defaults
    pub fn root_dir() -> PathBuf {
        PathBuf::from("public")
    }
    pub fn stations_dir() -> String {
        "stations".into()
    }
    pub fn index_file() -> String {
        "stations.json".into()
    }

    // Station defaults
    pub fn stations() -> Vec<StationInfo> {
        vec![StationInfo::new("140"), StationInfo::new("130")]
    }
}
