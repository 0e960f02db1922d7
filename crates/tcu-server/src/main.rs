mod config;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use tcu_client::ApiClient;
use tcu_web::session::{SessionStore, run_sweep_loop};
use tcu_web::{AppState, AppStateInner};

use config::Config;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tcu=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.addr()?;

    let api = ApiClient::new(&config.api_base_url, config.api_timeout)?;
    info!("Using API at {}", api.base_url());
    if !config.assets_dir.is_dir() {
        warn!("Assets directory {} not found", config.assets_dir.display());
    }

    let sessions = Arc::new(SessionStore::new(config.session_ttl));
    tokio::spawn(run_sweep_loop(sessions.clone(), SWEEP_INTERVAL));

    let state: AppState = Arc::new(AppStateInner {
        api,
        sessions,
        cookie_secure: config.cookie_secure,
    });
    let app = tcu_web::router(state, &config.assets_dir);

    info!("TCU web listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
