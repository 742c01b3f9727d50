//! Health check and batch status endpoints

use crate::core::batch::{BatchStatus, ProgressSnapshot, ResultArtifacts};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health and status routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/status", web::get().to(batch_status));
}

/// Health status response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
}

/// Status of the batch engine
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub active: bool,
    pub snapshot: ProgressSnapshot,
    pub artifacts: ResultArtifacts,
    /// Connected event observers
    pub observers: usize,
    pub peak_in_progress: usize,
}

/// Basic health check endpoint
pub async fn health_check() -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Current counters, last artifacts and observer count
pub async fn batch_status(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let BatchStatus {
        active,
        snapshot,
        artifacts,
        peak_in_progress,
    } = state.coordinator.state().status();
    let observers = state.bus.observer_count().await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(StatusReport {
        active,
        snapshot,
        artifacts,
        observers,
        peak_in_progress,
    })))
}
