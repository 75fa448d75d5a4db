//! Core library for the weather front end.
//!
//! This crate defines:
//! - Service configuration built once at startup
//! - The typed client for the weather backend
//! - The feature flag gate backed by an external configuration service
//! - Shared domain models and the client error taxonomy
//!
//! It is used by `frontend-web`, but can also be reused by other binaries or services.

pub mod backend;
pub mod config;
pub mod error;
pub mod flags;
pub mod model;

pub use backend::{ForecastBackend, HttpForecastBackend, backend_from_config};
pub use config::Config;
pub use error::ClientError;
pub use flags::{FeatureGate, FlagName, HttpFeatureGate, gate_from_config};
pub use model::{Forecast, ForecastRow};
