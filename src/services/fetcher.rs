// src/services/fetcher.rs

//! Station export fetcher.
//!
//! Requests the CSV export of a station series from the portal by submitting
//! the export form.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use reqwest::header::{ORIGIN, REFERER};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{ExportForm, FetcherConfig, StationInfo};
use crate::utils::http::create_async_client;
use crate::utils::portal_date;

/// Source of raw station exports.
#[async_trait]
pub trait StationSource: Send + Sync {
    /// Fetch the raw export text of one station.
    async fn fetch(&self, station: &StationInfo) -> Result<String>;
}

/// Form body of the portal's export request.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ExportRequest<'a> {
    sreihe: &'a str,
    smode: &'a str,
    sdatum: &'a str,
    senddatum: String,
    exportthema: &'a str,
}

impl<'a> ExportRequest<'a> {
    fn new(form: &'a ExportForm, end_date: NaiveDate) -> Self {
        Self {
            sreihe: &form.series,
            smode: &form.mode,
            sdatum: &form.start_date,
            senddatum: portal_date(end_date),
            exportthema: &form.export_theme,
        }
    }
}

/// Fetches station exports over HTTP.
pub struct HttpFetcher {
    config: FetcherConfig,
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a client built from the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = create_async_client(&config)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl StationSource for HttpFetcher {
    async fn fetch(&self, station: &StationInfo) -> Result<String> {
        let url = self.config.station_url(&station.id);
        let form = ExportRequest::new(&self.config.form, Local::now().date_naive());

        log::debug!("POST {} (station {})", url, station.id);

        let response = self
            .client
            .post(&url)
            .header(ORIGIN, &self.config.origin)
            .header(REFERER, &self.config.referer)
            .form(&form)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::fetch(&station.id, e))?;

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_request_fields() {
        let form = ExportForm::default();
        let end = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let request = ExportRequest::new(&form, end);

        assert_eq!(
            request,
            ExportRequest {
                sreihe: "ew",
                smode: "c",
                sdatum: "02.01.1975",
                senddatum: "01.02.2026".to_string(),
                exportthema: "pq",
            }
        );
    }

    #[test]
    fn test_export_request_serializes_in_field_order() {
        let form = ExportForm::default();
        let end = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let json = serde_json::to_string(&ExportRequest::new(&form, end)).unwrap();
        assert_eq!(
            json,
            r#"{"sreihe":"ew","smode":"c","sdatum":"02.01.1975","senddatum":"01.02.2026","exportthema":"pq"}"#
        );
    }

    #[test]
    fn test_http_fetcher_builds_from_defaults() {
        assert!(HttpFetcher::new(FetcherConfig::default()).is_ok());
    }
}
