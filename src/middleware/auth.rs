use crate::auth::context::UserContext;
use crate::auth::session::UserSession;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::PrivateCookieJar;

/// Session authentication middleware. Accepts a static API key (service
/// callers, admin scope) or a valid session cookie; everything else is 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let settings = &state.config;

    // API keys first: no session, no company, admin capabilities.
    if !settings.api_keys.is_empty() {
        let presented = headers
            .get(&settings.api_key_header)
            .and_then(|value| value.to_str().ok());

        if let Some(key) = presented {
            if settings.api_keys.iter().any(|k| k == key) {
                request.extensions_mut().insert(UserContext::new_api_key());
                return Ok(next.run(request).await);
            }
            return Err(ApiError::authentication("Invalid API key"));
        }
    }

    // The jar decrypts and authenticates the cookie; a tampered value
    // simply never shows up here.
    if let Some(cookie) = jar.get("session") {
        if let Ok(session) = serde_json::from_str::<UserSession>(cookie.value()) {
            if !session.is_expired() {
                let context = UserContext::new_user(
                    session.user_id,
                    session.email,
                    session.role,
                    session.company_id,
                );
                request.extensions_mut().insert(context);
                return Ok(next.run(request).await);
            }
            tracing::debug!(user_id = %session.user_id, "session expired");
        }
    }

    Err(ApiError::authentication("Authentication required"))
}
