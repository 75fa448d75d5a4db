use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use frontend_core::{Config, backend_from_config, gate_from_config};

use crate::app::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "frontend", version, about = "Weather front end")]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen address override, e.g. "0.0.0.0:8080".
    #[arg(long)]
    pub listen: Option<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_logging();

        let mut config = Config::load(self.config.as_deref())?;
        if let Some(listen) = self.listen {
            config.listen_addr = listen;
        }

        let addr = config.listen_socket_addr()?;
        let backend = backend_from_config(&config)?;
        let gate = gate_from_config(&config)?;

        let router = app::router(AppState::new(backend, gate));

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind listen address {addr}"))?;

        tracing::info!(%addr, "front end listening");

        axum::serve(listener, router).await.context("Server error")?;

        Ok(())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("frontend_web=info,frontend_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}
