use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::Deserialize;

use crate::{
    auth::context::UserContext,
    error::ApiError,
    models::Profile,
    services::Registration,
    AppState,
};

#[derive(Deserialize)]
pub struct LoginParams {
    email: String,
    password: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let profile = state.auth_service.register(registration).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /api/auth/login - verifies credentials and sets the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(params): Json<LoginParams>,
) -> Result<(PrivateCookieJar, Json<Profile>), ApiError> {
    let (session, profile) = state.auth_service.login(&params.email, &params.password).await?;

    let session_str = serde_json::to_string(&session).map_err(ApiError::Serialization)?;

    let cookie = Cookie::build(("session", session_str))
        .path("/")
        .secure(state.config.is_production())
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let jar = jar.add(cookie);

    Ok((jar, Json(profile)))
}

pub async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, impl IntoResponse) {
    let jar = jar.remove(Cookie::from("session"));
    (jar, "Logged out")
}

pub async fn get_me(Extension(user): Extension<UserContext>) -> Json<UserContext> {
    Json(user)
}
