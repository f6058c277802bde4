use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Headers attached to every response. Names must be lowercase for
/// `HeaderName::from_static`.
const SECURITY_HEADERS: &[(&str, &str)] = &[
    // Prevent MIME type sniffing
    ("x-content-type-options", "nosniff"),
    // Prevent clickjacking
    ("x-frame-options", "DENY"),
    // Enable XSS protection
    ("x-xss-protection", "1; mode=block"),
    // Control referrer information
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "content-security-policy",
        "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'",
    ),
    // Strict Transport Security (HTTPS only)
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
    // Permissions Policy (formerly Feature Policy)
    (
        "permissions-policy",
        "geolocation=(), microphone=(), camera=()",
    ),
];

/// Security headers middleware for content-type protection and other security measures
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    for &(name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
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

    async fn test_handler() -> &'static str {
        "test response"
    }

    #[tokio::test]
    async fn test_security_headers_middleware() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(middleware::from_fn(security_headers_middleware));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("x-xss-protection").unwrap(), "1; mode=block");
        assert_eq!(
            headers.get("referrer-policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
        assert!(headers.contains_key("content-security-policy"));
        assert!(headers.contains_key("strict-transport-security"));
        assert!(headers.contains_key("permissions-policy"));
    }

    #[test]
    fn test_header_names_are_static_safe() {
        for &(name, value) in SECURITY_HEADERS {
            assert_eq!(name, name.to_lowercase());
            assert!(HeaderValue::try_from(value).is_ok());
        }
    }
}
