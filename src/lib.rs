pub mod config;
pub mod http;
pub mod state;

use std::time::Duration;

use axum::{Router, routing::{get, post}};
use tower_http::timeout::TimeoutLayer;

pub use state::AppState;

/// The outer deadline a server built on this router should run under,
/// mirroring the source server's `http.Server{ReadTimeout, WriteTimeout}`:
/// enough for every retry this call could spend against the ACS, plus a
/// 5-second margin.
pub fn outer_deadline(io_timeout: Duration, write_retries: u32, read_retries: u32) -> Duration {
    io_timeout * (write_retries + read_retries) + Duration::from_secs(5)
}

pub fn build_router(state: AppState, deadline: Duration) -> Router {
    Router::new()
        .route("/sip2", post(http::dispatch::handle_sip2))
        .route("/healthz", get(http::health::healthz))
        .route("/readyz", get(http::health::readyz))
        .layer(TimeoutLayer::new(deadline))
        .with_state(state)
}
