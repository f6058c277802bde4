use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use std::time::Instant;

use crate::{database, AppState};

#[derive(Debug, Serialize)]
struct DatabaseCheck {
    healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    database: DatabaseCheck,
}

async fn check_database(state: &AppState) -> DatabaseCheck {
    let started = Instant::now();
    match database::health_check(&state.db_pool).await {
        Ok(()) => DatabaseCheck {
            healthy: true,
            response_time_ms: Some(started.elapsed().as_millis() as u64),
            error: None,
        },
        Err(error) => {
            tracing::error!(%error, "database health check failed");
            DatabaseCheck {
                healthy: false,
                response_time_ms: None,
                error: Some(error.to_string()),
            }
        }
    }
}

/// Full health report including database connectivity. Unhealthy replies
/// keep the report in the body under a 503 so probes can log the cause.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let database = check_database(&state).await;
    let healthy = database.healthy;

    let report = HealthReport {
        status: if healthy { "healthy" } else { "unhealthy" },
        service: "inf-backend",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        database,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

/// Plain-text endpoint for load balancers.
pub async fn health_check_simple() -> &'static str {
    "OK"
}

/// Readiness gate: the service can take traffic once the database answers.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let database = check_database(&state).await;
    let status = if database.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(serde_json::json!({
            "ready": database.healthy,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Liveness only proves the process responds; no dependencies checked.
pub async fn liveness_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "alive": true,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_simple_health_answers_ok() {
        let app = Router::new().route("/health", get(health_check_simple));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_liveness_never_touches_dependencies() {
        let app = Router::new().route("/live", get(liveness_check));
        let request = Request::builder().uri("/live").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
