//! End-to-end tests for the front end routes, served over a real socket.

use std::{net::SocketAddr, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use httpmock::prelude::*;

use frontend_core::{
    Forecast, ForecastBackend, HttpFeatureGate, HttpForecastBackend, error::Result,
};
use frontend_web::app::{self, AppState};

const TIMEOUT: Duration = Duration::from_secs(2);

/// Bind an ephemeral port and serve the app on it.
async fn spawn_app(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let router = app::router(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    addr
}

fn backend(base: &str) -> HttpForecastBackend {
    HttpForecastBackend::new(base.parse().expect("valid base url"), TIMEOUT)
}

fn gate(base: &str, label: Option<&str>) -> HttpFeatureGate {
    HttpFeatureGate::new(
        base.parse().expect("valid endpoint url"),
        label.map(ToString::to_string),
        TIMEOUT,
    )
}

/// Address with nothing listening on it, for unreachable-upstream tests.
fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    format!("http://{addr}")
}

/// Fixed in-process backend, standing in for the HTTP variant.
#[derive(Debug)]
struct StubBackend {
    forecasts: Vec<Forecast>,
}

#[async_trait]
impl ForecastBackend for StubBackend {
    async fn get_forecasts(&self) -> Result<Vec<Forecast>> {
        Ok(self.forecasts.clone())
    }
}

#[tokio::test]
async fn forecast_listing_renders_backend_rows() {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(GET).path("/WeatherForecast");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"date": "2024-01-01", "temperatureC": 20, "summary": "Mild"}
            ]));
    });

    let state = AppState::new(backend(&upstream.base_url()), gate(&dead_endpoint(), None));
    let addr = spawn_app(state).await;

    let response = reqwest::get(format!("http://{addr}/")).await.expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let rows: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(
        rows,
        serde_json::json!([
            {"date": "2024-01-01", "temperatureC": 20, "temperatureF": 68, "summary": "Mild"}
        ])
    );
}

#[tokio::test]
async fn forecast_listing_preserves_server_order() {
    let stub = StubBackend {
        forecasts: vec![
            Forecast {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).expect("valid date"),
                temperature_c: -3,
                summary: "Freezing".to_string(),
            },
            Forecast {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
                temperature_c: 20,
                summary: "Mild".to_string(),
            },
        ],
    };

    let addr = spawn_app(AppState::new(stub, gate(&dead_endpoint(), None))).await;

    let rows: serde_json::Value = reqwest::get(format!("http://{addr}/"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(rows[0]["summary"], "Freezing");
    assert_eq!(rows[1]["summary"], "Mild");
}

#[tokio::test]
async fn empty_backend_listing_returns_empty_array() {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(GET).path("/WeatherForecast");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let state = AppState::new(backend(&upstream.base_url()), gate(&dead_endpoint(), None));
    let addr = spawn_app(state).await;

    let response = reqwest::get(format!("http://{addr}/")).await.expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let rows: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(rows, serde_json::json!([]));
}

#[tokio::test]
async fn backend_failure_returns_bad_gateway() {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(GET).path("/WeatherForecast");
        then.status(500).body("backend exploded");
    });

    let state = AppState::new(backend(&upstream.base_url()), gate(&dead_endpoint(), None));
    let addr = spawn_app(state).await;

    let response = reqwest::get(format!("http://{addr}/")).await.expect("request");

    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body = response.text().await.expect("body");
    assert!(!body.contains("backend exploded"));
}

#[tokio::test]
async fn beta_page_reflects_flag_under_matching_label() {
    let flags = MockServer::start();
    flags.mock(|when, then| {
        when.method(GET).path("/flags/Beta").query_param("label", "prod");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"enabled": true}));
    });

    let state = AppState::new(
        backend(&dead_endpoint()),
        gate(&flags.base_url(), Some("prod")),
    );
    let addr = spawn_app(state).await;

    let response = reqwest::get(format!("http://{addr}/beta")).await.expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response.text().await.expect("body");
    assert!(body.contains("data-beta-enabled=\"true\""));
}

#[tokio::test]
async fn beta_page_is_disabled_under_non_matching_label() {
    let flags = MockServer::start();
    flags.mock(|when, then| {
        // Registered for "prod" only; any other label falls through to 404.
        when.method(GET).path("/flags/Beta").query_param("label", "prod");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"enabled": true}));
    });

    let state = AppState::new(
        backend(&dead_endpoint()),
        gate(&flags.base_url(), Some("staging")),
    );
    let addr = spawn_app(state).await;

    let response = reqwest::get(format!("http://{addr}/beta")).await.expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response.text().await.expect("body");
    assert!(body.contains("data-beta-enabled=\"false\""));
}

#[tokio::test]
async fn gate_failure_returns_service_unavailable() {
    let state = AppState::new(backend(&dead_endpoint()), gate(&dead_endpoint(), None));
    let addr = spawn_app(state).await;

    let response = reqwest::get(format!("http://{addr}/beta")).await.expect("request");

    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn healthz_returns_ok() {
    let state = AppState::new(backend(&dead_endpoint()), gate(&dead_endpoint(), None));
    let addr = spawn_app(state).await;

    let response = reqwest::get(format!("http://{addr}/healthz")).await.expect("request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "ok");
}
