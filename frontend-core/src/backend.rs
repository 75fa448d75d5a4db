use crate::{Config, error::Result, model::Forecast};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

pub use http::HttpForecastBackend;

/// Capability to fetch the forecast listing from the weather backend.
///
/// One production implementation talks HTTP; tests substitute their own.
#[async_trait]
pub trait ForecastBackend: Send + Sync + Debug {
    /// Fetch all forecasts, preserving the order the backend returned them in.
    async fn get_forecasts(&self) -> Result<Vec<Forecast>>;
}

/// Construct the production backend client from config.
pub fn backend_from_config(config: &Config) -> anyhow::Result<HttpForecastBackend> {
    let base = config.weather_api_url()?;

    Ok(HttpForecastBackend::new(base, config.request_timeout()))
}
