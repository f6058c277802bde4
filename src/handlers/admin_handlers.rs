use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Role},
    error::ApiError,
    models::{Company, Profile, ProfileFlagsUpdate},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyCompanyRequest {
    pub verified: bool,
}

/// GET /api/admin/users?role - profiles with approval and priority flags
pub async fn list_users(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(params): Query<UserListQuery>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    user.require_role(Role::Admin)?;

    let profiles = app_state.profile_repository.list_by_role(params.role).await?;
    Ok(Json(profiles))
}

/// PATCH /api/admin/users/:id - set account_approved / is_deprioritized.
/// Returns the updated profile so clients can reconcile optimistic state.
pub async fn update_user_flags(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProfileFlagsUpdate>,
) -> Result<Json<Profile>, ApiError> {
    user.require_role(Role::Admin)?;

    let profile = app_state.profile_repository.update_flags(id, &update).await?;

    tracing::info!(
        profile_id = %id,
        account_approved = ?update.account_approved,
        is_deprioritized = ?update.is_deprioritized,
        "user flags updated"
    );
    Ok(Json(profile))
}

/// GET /api/admin/companies - all companies, unverified included
pub async fn list_companies(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<Company>>, ApiError> {
    user.require_role(Role::Admin)?;

    let companies = app_state.company_repository.list(false).await?;
    Ok(Json(companies))
}

/// POST /api/admin/companies/:id/verify - verification gates the catalog
pub async fn verify_company(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
    user.require_role(Role::Admin)?;

    let company = app_state
        .company_repository
        .set_verified(id, payload.verified)
        .await?;

    tracing::info!(company_id = %id, verified = payload.verified, "company verification updated");
    Ok(Json(company))
}
