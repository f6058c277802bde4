use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use tokio::signal;

use inf_backend::{app_router, config::Settings, middleware::init_logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("loading configuration")?;
    init_logging(&settings.log_level, &settings.log_format).context("initializing logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %settings.environment,
        "starting inf-backend"
    );

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.http_port));
    let state = AppState::new(settings)
        .await
        .context("building application state")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or, on unix, SIGTERM. Used to drain in-flight
/// requests before the process exits.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(term) => term,
            Err(error) => {
                tracing::error!(%error, "SIGTERM handler unavailable, falling back to ctrl-c");
                let _ = signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => tracing::info!("ctrl-c received"),
            _ = term.recv() => tracing::info!("SIGTERM received"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
        tracing::info!("ctrl-c received");
    }
}
