use std::time::Duration;

use sip2_gateway::config;
use sip2_gateway::AppState;
use sip2_pool::{CommunicatorOptions, ConnectionPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(log_level)).init();

    let cfg = config::load_config().expect("failed to load gateway config");

    let addr = tokio::net::lookup_host((cfg.acs.host.as_str(), cfg.acs.port))
        .await
        .unwrap_or_else(|e| panic!("could not resolve ACS address {}:{}: {e}", cfg.acs.host, cfg.acs.port))
        .next()
        .unwrap_or_else(|| panic!("ACS address {}:{} resolved to no addresses", cfg.acs.host, cfg.acs.port));

    info!(host = %cfg.acs.host, port = cfg.acs.port, size = cfg.pool.size, "dialing ACS connection pool");
    let pool = ConnectionPool::connect(addr, cfg.pool.size, Duration::from_secs(cfg.pool.connect_timeout_secs))
        .await
        .expect("failed to establish initial ACS connection pool");
    info!("ACS connection pool ready");

    let communicator = CommunicatorOptions {
        io_timeout: Duration::from_secs(cfg.pool.io_timeout_secs),
        write_retries: cfg.pool.write_retries,
        read_retries: cfg.pool.read_retries,
        error_detection: cfg.pool.error_detection,
    };

    let deadline =
        sip2_gateway::outer_deadline(communicator.io_timeout, cfg.pool.write_retries, cfg.pool.read_retries);

    let state = AppState::new(pool, communicator);
    let shared_pool = state.pool.clone();
    let router = sip2_gateway::build_router(state, deadline);

    let listener = tokio::net::TcpListener::bind(&cfg.http.bind).await.expect("failed to bind HTTP listener");
    info!(addr = %cfg.http.bind, "sip2-gateway listening");
    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    info!("draining ACS connection pool");
    tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        let _ = cancel_tx.send(true);
    });
    match shared_pool.close(&cancel_rx).await {
        Ok(()) => info!("sip2-gateway shut down gracefully"),
        Err(err) => tracing::warn!(%err, "ACS connection pool did not fully drain before shutdown"),
    }
}

/// Waits for SIGTERM or Ctrl-C (SIGINT) and returns to trigger graceful shutdown.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { info!("received Ctrl+C, shutting down"); },
        _ = terminate => { info!("received SIGTERM, shutting down"); },
    }
}
