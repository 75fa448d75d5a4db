use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

use crate::{
    error::{ClientError, Result},
    model::Forecast,
};

use super::ForecastBackend;

const SERVICE: &str = "weather backend";

/// HTTP client for the weather backend's forecast listing.
///
/// Issues one outbound GET per call against the configured base address;
/// no caching, no retry.
#[derive(Debug, Clone)]
pub struct HttpForecastBackend {
    base: Url,
    http: Client,
}

impl HttpForecastBackend {
    pub fn new(base: Url, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build weather backend HTTP client");

        Self { base, http }
    }
}

#[async_trait]
impl ForecastBackend for HttpForecastBackend {
    async fn get_forecasts(&self) -> Result<Vec<Forecast>> {
        let url = format!("{}/WeatherForecast", self.base.as_str().trim_end_matches('/'));

        debug!(%url, "fetching forecasts");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Network { service: SERVICE, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ClientError::Network { service: SERVICE, source })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        let forecasts: Vec<Forecast> = serde_json::from_str(&body)
            .map_err(|source| ClientError::Deserialize { service: SERVICE, source })?;

        Ok(forecasts)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
