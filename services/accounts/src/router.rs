use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use gatehouse_core::health::healthz;
use gatehouse_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{current_account, register, verify_email},
    reset::{forgot_password, reset_password},
    session::{login, logout, refresh_session},
};
use crate::state::AppState;

/// `GET /readyz` — ready once the database answers a ping.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Account lifecycle
        .route("/api/v1/users/register", post(register))
        .route("/api/v1/users/verify/{token}", get(verify_email))
        .route("/api/v1/users/me", get(current_account))
        // Sessions
        .route("/api/v1/users/login", post(login))
        .route("/api/v1/users/refresh-token", post(refresh_session))
        .route("/api/v1/users/logout", post(logout))
        // Password reset
        .route("/api/v1/users/forgot-password", post(forgot_password))
        .route("/api/v1/users/reset-password/{token}", post(reset_password))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
