use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

fn base_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}

/// CORS policy from configuration. Session cookies need credentialed
/// requests, so origins are always explicit: with an empty or `*` list
/// the layer mirrors the request origin (development behavior), and
/// otherwise only the configured origins are allowed.
pub fn create_cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        tracing::debug!("cors: mirroring request origin");
        return base_layer().allow_origin(AllowOrigin::mirror_request());
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%origin, %error, "cors: ignoring unparseable origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        // Every configured origin failed to parse. Mirroring would silently
        // widen the policy, so fall back to rejecting cross-origin calls.
        tracing::warn!("cors: no valid origins configured, cross-origin requests disabled");
        return base_layer();
    }

    tracing::debug!(count = origins.len(), "cors: restricting to configured origins");
    base_layer().allow_origin(origins)
}
