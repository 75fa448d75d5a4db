use crate::{Config, error::Result};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod http;

pub use http::HttpFeatureGate;

/// Feature flags known to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagName {
    Beta,
}

impl FlagName {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagName::Beta => "Beta",
        }
    }

    pub const fn all() -> &'static [FlagName] {
        &[FlagName::Beta]
    }
}

impl std::fmt::Display for FlagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FlagName {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "beta" => Ok(FlagName::Beta),
            _ => Err(anyhow::anyhow!("Unknown feature flag '{value}'. Known flags: Beta.")),
        }
    }
}

/// Capability to resolve a named boolean feature flag.
///
/// Resolution happens per request against the external configuration
/// service; results are never cached beyond the request. The revision
/// label scoping resolution is fixed at construction time.
#[async_trait]
pub trait FeatureGate: Send + Sync + Debug {
    /// Resolve the named flag. Flags the provider does not know resolve
    /// to `false`; a provider that cannot be used at all is an error.
    async fn is_enabled(&self, flag: &str) -> Result<bool>;
}

/// Construct the production feature gate from config.
pub fn gate_from_config(config: &Config) -> anyhow::Result<HttpFeatureGate> {
    let endpoint = config.feature_config_url()?;

    Ok(HttpFeatureGate::new(
        endpoint,
        config.revision_label.clone(),
        config.request_timeout(),
    ))
}
