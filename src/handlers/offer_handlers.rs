use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Role},
    error::ApiError,
    models::{Offer, OfferCreate, OfferSearch, OfferUpdate, OfferWithCompany},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct OfferListQuery {
    q: Option<String>,
    event_id: Option<Uuid>,
    company_id: Option<Uuid>,
    tag: Option<String>,
}

/// GET /api/offers - catalog of active offers from verified companies
pub async fn list_offers(
    State(app_state): State<AppState>,
    Query(params): Query<OfferListQuery>,
) -> Result<Json<Vec<OfferWithCompany>>, ApiError> {
    let search = OfferSearch {
        q: params.q,
        event_id: params.event_id,
        company_id: params.company_id,
        tag: params.tag,
    };

    let offers = app_state.offer_repository.search(&search).await?;
    Ok(Json(offers))
}

/// GET /api/offers/mine - the company's own offers, inactive included
pub async fn my_offers(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<Offer>>, ApiError> {
    let company_id = user.require_company_id()?;

    let offers = app_state.offer_repository.list_by_company(company_id).await?;
    Ok(Json(offers))
}

/// GET /api/offers/:id
pub async fn get_offer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OfferWithCompany>, ApiError> {
    let offer = app_state
        .offer_repository
        .get_with_company(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Offer not found"))?;

    Ok(Json(offer))
}

/// POST /api/offers
pub async fn create_offer(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(payload): Json<OfferCreate>,
) -> Result<Json<Offer>, ApiError> {
    let company_id = user.require_company_id()?;

    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Offer title cannot be empty"));
    }

    app_state
        .event_repository
        .get_by_id(payload.event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    let offer = app_state.offer_repository.create(company_id, &payload).await?;

    tracing::info!(offer_id = %offer.id, company_id = %company_id, "offer created");
    Ok(Json(offer))
}

/// PATCH /api/offers/:id - owner or admin
pub async fn update_offer(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OfferUpdate>,
) -> Result<Json<Offer>, ApiError> {
    let offer = app_state
        .offer_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Offer not found"))?;

    require_offer_owner(&user, &offer)?;

    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("Offer title cannot be empty"));
        }
    }

    let offer = app_state.offer_repository.update(id, &payload).await?;
    Ok(Json(offer))
}

/// DELETE /api/offers/:id - owner or admin
pub async fn delete_offer(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let offer = app_state
        .offer_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Offer not found"))?;

    require_offer_owner(&user, &offer)?;

    app_state.offer_repository.delete(id).await?;

    tracing::info!(offer_id = %id, "offer deleted");
    Ok(Json(json!({ "message": "Offer deleted" })))
}

fn require_offer_owner(user: &UserContext, offer: &Offer) -> Result<(), ApiError> {
    if user.has_role(Role::Admin) || user.company_id == Some(offer.company_id) {
        Ok(())
    } else {
        Err(ApiError::authorization(
            "You can only manage your own offers",
        ))
    }
}
