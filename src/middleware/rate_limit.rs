use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Duration};

use crate::{config::Settings, services::MetricsService};

pub type AppRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Process-wide limiter sized from configuration. Validation guarantees
/// both knobs are nonzero; the fallbacks only guard hand-built settings.
pub fn create_rate_limiter(settings: &Settings) -> AppRateLimiter {
    let burst = NonZeroU32::new(settings.rate_limit_requests).unwrap_or(NonZeroU32::MIN);
    let window = Duration::from_secs(u64::from(settings.rate_limit_window_seconds.max(1)));

    let quota = Quota::with_period(window)
        .unwrap_or_else(|| Quota::per_minute(burst))
        .allow_burst(burst);

    RateLimiter::direct(quota)
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<AppRateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if limiter.check().is_err() {
        tracing::warn!(path = request.uri().path(), "rate limit exceeded");
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }
    Ok(next.run(request).await)
}

/// Feeds the in-process metrics service and flags slow requests.
/// Client errors count as handled requests; only 5xx mark a failure.
pub async fn metrics_middleware(
    State(metrics): State<Arc<MetricsService>>,
    request: Request,
    next: Next,
) -> Response {
    let started = std::time::Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    let status = response.status();
    metrics.record_request(&path, method.as_str(), elapsed, !status.is_server_error());

    if elapsed > Duration::from_millis(1000) {
        tracing::warn!(
            %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = elapsed.as_millis(),
            "slow request"
        );
    }

    response
}
