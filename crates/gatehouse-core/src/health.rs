use axum::http::StatusCode;

/// `GET /healthz` — liveness. Always 200 while the process is serving.
///
/// Readiness is service-specific (it usually touches the database), so each
/// service wires its own `/readyz` handler.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
