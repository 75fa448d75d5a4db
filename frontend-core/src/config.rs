use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{env, fs, net::SocketAddr, path::Path, time::Duration};

/// Top-level service configuration, built once at startup and read-only
/// afterward. Values come from an optional TOML file, overridden by
/// environment variables; anything missing or malformed aborts startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the weather backend, e.g. "http://localhost:5117".
    pub weather_api: String,

    /// Endpoint of the feature configuration service resolving flags.
    pub feature_config: String,

    /// Optional revision label scoping flag resolution, e.g. "prod".
    pub revision_label: Option<String>,

    /// Address the front end listens on.
    pub listen_addr: String,

    /// Timeout applied to both outbound clients, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_api: String::new(),
            feature_config: String::new(),
            revision_label: None,
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Config {
    /// Load config from an optional file, apply environment overrides and
    /// validate. Errors here are fatal: the process must not start with a
    /// partial configuration and defer discovery to the first request.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => Self::default(),
        };

        cfg.apply_overrides(|key| env::var(key).ok());
        cfg.validate()?;

        Ok(cfg)
    }

    /// Environment variables win over file values.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("WEATHER_API") {
            self.weather_api = value;
        }
        if let Some(value) = lookup("FEATURE_CONFIG") {
            self.feature_config = value;
        }
        if let Some(value) = lookup("REVISION_LABEL") {
            self.revision_label = if value.is_empty() { None } else { Some(value) };
        }
        if let Some(value) = lookup("LISTEN_ADDR") {
            self.listen_addr = value;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.weather_api.is_empty() {
            bail!(
                "No weather backend address configured.\n\
                 Hint: set `weather_api` in the config file or the WEATHER_API environment variable."
            );
        }
        self.weather_api_url()?;

        if self.feature_config.is_empty() {
            bail!(
                "No feature configuration endpoint configured.\n\
                 Hint: set `feature_config` in the config file or the FEATURE_CONFIG environment variable."
            );
        }
        self.feature_config_url()?;

        self.listen_socket_addr()?;

        if self.request_timeout_secs == 0 {
            bail!("`request_timeout_secs` must be greater than zero.");
        }

        Ok(())
    }

    pub fn weather_api_url(&self) -> Result<Url> {
        Url::parse(&self.weather_api)
            .with_context(|| format!("Invalid weather backend address: {}", self.weather_api))
    }

    pub fn feature_config_url(&self) -> Result<Url> {
        Url::parse(&self.feature_config).with_context(|| {
            format!("Invalid feature configuration endpoint: {}", self.feature_config)
        })
    }

    pub fn listen_socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.listen_addr))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
