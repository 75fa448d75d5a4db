use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the outbound clients.
///
/// Route handlers receive these unmodified and map them onto response
/// statuses; no variant is ever swallowed or replaced with empty data.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The connection to the upstream service could not be established.
    #[error("failed to reach {service}: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream service answered with a non-success status.
    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The upstream response body did not match the expected shape.
    #[error("failed to parse {service} response: {source}")]
    Deserialize {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The feature configuration service could not be used at resolution time.
    #[error("feature configuration unavailable: {0}")]
    ConfigUnavailable(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
