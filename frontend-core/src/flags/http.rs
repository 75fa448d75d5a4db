use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};

use super::FeatureGate;

/// HTTP client for the external feature configuration service.
///
/// Resolves flags via `GET {endpoint}/flags/{name}`, scoped by the
/// revision label configured at startup. A flag the service does not
/// know (including one registered under a different label) answers 404
/// and resolves to disabled.
#[derive(Debug, Clone)]
pub struct HttpFeatureGate {
    endpoint: Url,
    label: Option<String>,
    http: Client,
}

impl HttpFeatureGate {
    pub fn new(endpoint: Url, label: Option<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build feature configuration HTTP client");

        Self { endpoint, label, http }
    }
}

/// Resolution result as served by the feature configuration service.
#[derive(Debug, Deserialize)]
struct FlagState {
    enabled: bool,
}

#[async_trait]
impl FeatureGate for HttpFeatureGate {
    async fn is_enabled(&self, flag: &str) -> Result<bool> {
        let url = format!("{}/flags/{flag}", self.endpoint.as_str().trim_end_matches('/'));

        debug!(%url, label = self.label.as_deref(), "resolving feature flag");

        let mut req = self.http.get(&url);
        if let Some(label) = &self.label {
            req = req.query(&[("label", label.as_str())]);
        }

        let res = req.send().await.map_err(|e| {
            ClientError::ConfigUnavailable(format!("failed to reach feature configuration: {e}"))
        })?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            debug!(flag, "flag not registered, resolving to disabled");
            return Ok(false);
        }

        let body = res.text().await.map_err(|e| {
            ClientError::ConfigUnavailable(format!(
                "failed to read feature configuration response: {e}"
            ))
        })?;

        if !status.is_success() {
            return Err(ClientError::ConfigUnavailable(format!(
                "feature configuration returned status {status}: {}",
                truncate_body(&body),
            )));
        }

        let state: FlagState = serde_json::from_str(&body).map_err(|e| {
            ClientError::ConfigUnavailable(format!(
                "failed to parse feature configuration response: {e}"
            ))
        })?;

        Ok(state.enabled)
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
