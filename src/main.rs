use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tracing::{error, info};

use paperscout::{api, app, config, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init();

    let (cfg, cfg_path) = config::Config::load();
    info!(?cfg_path, "config loaded");

    let state = app::AppState::new(cfg);
    let router: Router = api::build_router(state);

    let addr: SocketAddr = std::env::var("PAPERSCOUT_BIND")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
        .parse()
        .context("invalid PAPERSCOUT_BIND address")?;

    info!(%addr, version = env!("CARGO_PKG_VERSION"), "paperscout listening");

    let server = axum::serve(tokio::net::TcpListener::bind(addr).await?, router);

    let graceful = server.with_graceful_shutdown(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("ctrl-c received; shutting down");
    });

    if let Err(e) = graceful.await {
        error!(error = %e, "server error");
    }

    Ok(())
}
