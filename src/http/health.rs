use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::state::AppState;

/// Always 200 once the process is up — liveness, not readiness.
pub async fn healthz() -> impl IntoResponse {
    "ok"
}

/// 200 once the pool has every connection dialed; 503 otherwise. The pool
/// is built before the router starts serving, so this is really just
/// confirming the pool isn't empty (a pool that failed to fill any slot
/// at startup never gets this far — see `main`).
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.pool.is_empty() {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    } else {
        (StatusCode::OK, "ok")
    }
}
