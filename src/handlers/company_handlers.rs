use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::{
    auth::context::UserContext,
    error::ApiError,
    models::{Company, CompanyUpdate},
    AppState,
};

/// GET /api/companies - verified companies, catalog view
pub async fn list_companies(State(app_state): State<AppState>) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = app_state.company_repository.list(true).await?;
    Ok(Json(companies))
}

/// GET /api/companies/:id
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, ApiError> {
    let company = app_state
        .company_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;

    Ok(Json(company))
}

/// GET /api/companies/me - the caller's own company
pub async fn get_my_company(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Company>, ApiError> {
    let company_id = user.require_company_id()?;

    let company = app_state
        .company_repository
        .get_by_id(company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;

    Ok(Json(company))
}

/// PATCH /api/companies/me - company self-service edits
pub async fn update_my_company(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(update): Json<CompanyUpdate>,
) -> Result<Json<Company>, ApiError> {
    let company_id = user.require_company_id()?;

    if let Some(name) = &update.company_name {
        if name.trim().is_empty() {
            return Err(ApiError::validation("Company name cannot be empty"));
        }
    }

    let company = app_state
        .company_repository
        .update(company_id, &update)
        .await?;

    Ok(Json(company))
}
