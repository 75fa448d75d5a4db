//! Router, shared state and request handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::{error, info};

use frontend_core::{ClientError, FeatureGate, FlagName, ForecastBackend, ForecastRow};

/// Shared application state.
///
/// Holds the outbound clients shared across all request handlers; both
/// are pooled and safe for concurrent use, so no further synchronization
/// is needed.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn ForecastBackend>,
    gate: Arc<dyn FeatureGate>,
}

impl AppState {
    pub fn new(
        backend: impl ForecastBackend + 'static,
        gate: impl FeatureGate + 'static,
    ) -> Self {
        Self {
            backend: Arc::new(backend),
            gate: Arc::new(gate),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_forecasts))
        .route("/beta", get(beta_page))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// `GET /` — the forecast listing, proxied from the weather backend.
///
/// Renders the backend's forecasts in server order, with the derived
/// Fahrenheit value added per row. Any backend failure becomes a failure
/// response; partial data is never substituted.
async fn list_forecasts(State(state): State<AppState>) -> Response {
    match state.backend.get_forecasts().await {
        Ok(forecasts) => {
            info!(count = forecasts.len(), "serving forecast listing");
            let rows: Vec<ForecastRow> = forecasts.iter().map(ForecastRow::from).collect();
            Json(rows).into_response()
        }
        Err(err) => failure_response(&err),
    }
}

/// `GET /beta` — the gated content page.
///
/// Resolves the `Beta` flag per request and embeds its state in the page.
async fn beta_page(State(state): State<AppState>) -> Response {
    match state.gate.is_enabled(FlagName::Beta.as_str()).await {
        Ok(enabled) => Html(render_beta_page(enabled)).into_response(),
        Err(err) => failure_response(&err),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

fn render_beta_page(enabled: bool) -> String {
    let state = if enabled { "enabled" } else { "disabled" };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Beta</title></head>\n\
         <body>\n\
         <h1>Beta</h1>\n\
         <p>Beta features are <strong data-beta-enabled=\"{enabled}\">{state}</strong> \
         on this deployment.</p>\n\
         </body>\n\
         </html>\n"
    )
}

/// Map a client failure onto a response, logging the full cause.
///
/// Upstream error text stays in the logs; callers get a short fixed body.
fn failure_response(err: &ClientError) -> Response {
    error!(%err, "upstream call failed");

    let (status, message) = match err {
        ClientError::Network { .. } | ClientError::Status { .. } | ClientError::Deserialize { .. } => {
            (StatusCode::BAD_GATEWAY, "weather backend request failed")
        }
        ClientError::ConfigUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "feature configuration unavailable")
        }
    };

    (status, message).into_response()
}
