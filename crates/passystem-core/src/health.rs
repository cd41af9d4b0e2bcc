use axum::http::StatusCode;

/// Liveness probe for `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe for `GET /readyz`. Services hold off binding until their
/// database connection is up, so readiness mirrors liveness.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
