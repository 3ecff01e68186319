//! Pipeline entry points.
//!
//! - `run_publisher`: Fetch, normalize and publish all configured stations

pub mod publish;

pub use publish::{RunSummary, run_publisher};
