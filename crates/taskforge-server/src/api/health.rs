//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthCheckReturn {
    pub message: &'static str,
}

pub async fn health_check() -> Json<HealthCheckReturn> {
    Json(HealthCheckReturn {
        message: "Service is healthy.",
    })
}
