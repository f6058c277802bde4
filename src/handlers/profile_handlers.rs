use axum::{
    extract::{Extension, State},
    response::Json,
};

use crate::{
    auth::context::UserContext,
    error::ApiError,
    models::{Profile, ProfileUpdate},
    utils::{validate_full_name, validate_phone},
    AppState,
};

/// GET /api/profile - the signed-in user's profile
pub async fn get_profile(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Profile>, ApiError> {
    let user_id = user.require_user_id()?;

    let profile = app_state
        .profile_repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    Ok(Json(profile))
}

/// PATCH /api/profile - self-service profile edits
pub async fn update_profile(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    let user_id = user.require_user_id()?;

    if let Some(full_name) = &update.full_name {
        validate_full_name(full_name)?;
    }
    if let Some(phone) = &update.phone {
        validate_phone(phone)?;
    }

    let profile = app_state
        .profile_repository
        .update_profile(user_id, &update)
        .await?;

    Ok(Json(profile))
}
