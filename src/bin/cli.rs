//! Wasserportal publisher CLI
//!
//! Fetches every configured station, normalizes its export and writes the
//! station files plus the index. Takes no flags: the configuration path comes
//! from `WASSERPORTAL_CONFIG` (default `data/config.toml`), the log filter
//! from `RUST_LOG`.

use std::path::PathBuf;

use wasserportal::{
    error::Result, models::Config, pipeline, services::HttpFetcher, storage::LocalStorage,
};

/// Environment variable overriding the configuration path.
const CONFIG_ENV: &str = "WASSERPORTAL_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "data/config.toml";

/// Initialize logging, `info` unless `RUST_LOG` says otherwise.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config_path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load_or_default(&config_path);

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let fetcher = HttpFetcher::new(config.fetcher.clone())?;
    let storage = LocalStorage::new(config.output.clone());

    log::info!(
        "Publishing {} stations to {}",
        config.stations.len(),
        storage.root_dir().display()
    );
    pipeline::run_publisher(&config, &fetcher, &storage).await?;

    log::info!("Done!");

    Ok(())
}
