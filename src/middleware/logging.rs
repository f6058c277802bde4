use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use tracing::Level;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};
use uuid::Uuid;

pub fn create_logging_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(tower_http::trace::DefaultOnResponse::new().level(Level::DEBUG))
}

/// Tags every request with a correlation id and emits one completion event
/// carrying method, path, status and latency.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::debug!(
        %correlation_id,
        %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = started.elapsed().as_millis(),
        "request handled"
    );

    response
}

/// Install the global subscriber. The configured level drives the crate's
/// own directive; noisy dependencies stay pinned regardless of RUST_LOG.
pub fn init_logging(log_level: &str, log_format: &str) -> Result<(), TryInitError> {
    let level = log_level.parse::<Level>().unwrap_or_else(|_| {
        eprintln!("unknown log level {log_level:?}, using info");
        Level::INFO
    });

    let filter = EnvFilter::new(format!("inf_backend={level},tower_http=info,sqlx=warn"));

    let fmt_layer: Box<dyn Layer<_> + Send + Sync> = if log_format.eq_ignore_ascii_case("plain") {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(log_level, log_format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_request_logging_passes_the_response_through() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(request_logging_middleware));

        let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_level_strings_parse() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::DEBUG);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::WARN);
        assert!("verbose".parse::<Level>().is_err());
    }
}
