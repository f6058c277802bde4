use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ApiError, services::metrics_service::PerformanceReport, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub uptime_seconds: u64,
    pub memory_usage: MemoryUsage,
    pub cpu_usage_percent: f64,
    pub total_requests: u64,
    pub requests_per_second: f64,
    pub endpoints_tracked: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

/// Get overall dashboard metrics
pub async fn get_metrics(
    State(app_state): State<AppState>,
) -> Result<Json<DashboardMetrics>, ApiError> {
    let report = app_state.metrics_service.report();
    let system = report.system;
    let overall = report.overall;

    let metrics = DashboardMetrics {
        uptime_seconds: system.uptime_seconds,
        memory_usage: MemoryUsage {
            total_bytes: system.total_memory_bytes,
            used_bytes: system.memory_usage_bytes,
            free_bytes: system
                .total_memory_bytes
                .saturating_sub(system.memory_usage_bytes),
        },
        cpu_usage_percent: system.cpu_usage_percent,
        total_requests: overall.total_requests,
        requests_per_second: overall.requests_per_second,
        endpoints_tracked: report.endpoints.len(),
    };

    Ok(Json(metrics))
}

/// Get comprehensive performance report
pub async fn get_performance_report(
    State(app_state): State<AppState>,
) -> Result<Json<PerformanceReport>, ApiError> {
    Ok(Json(app_state.metrics_service.report()))
}

/// Get system health status derived from the request metrics
pub async fn get_health_metrics(
    State(app_state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let report = app_state.metrics_service.report();

    let is_healthy = report.overall.average_response_time_ms < 1000.0
        && (report.overall.failed_requests as f64 / report.overall.total_requests.max(1) as f64)
            < 0.1;

    let status = if is_healthy { "healthy" } else { "degraded" };

    Ok(Json(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": report.system.uptime_seconds,
        "total_requests": report.overall.total_requests,
        "success_rate": if report.overall.total_requests > 0 {
            report.overall.successful_requests as f64 / report.overall.total_requests as f64
        } else {
            1.0
        },
        "average_response_time_ms": report.overall.average_response_time_ms,
        "requests_per_second": report.overall.requests_per_second,
        "endpoints_tracked": report.endpoints.len()
    })))
}
