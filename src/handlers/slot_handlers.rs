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
    models::{
        ConflictCheckResponse, EventSlot, SlotAvailabilityResponse, SlotCreate, SlotUpdate,
        SlotWithBookings,
    },
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SlotListQuery {
    company_id: Uuid,
    event_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MySlotsQuery {
    event_id: Option<Uuid>,
}

/// GET /api/slots?company_id&event_id - bookable slots for a company
pub async fn list_slots(
    State(app_state): State<AppState>,
    Query(params): Query<SlotListQuery>,
) -> Result<Json<SlotAvailabilityResponse>, ApiError> {
    let response = app_state
        .slot_service
        .available_slots(params.company_id, params.event_id)
        .await?;

    Ok(Json(response))
}

/// GET /api/slots/mine - the company's own slots with booking counts,
/// full and inactive ones included
pub async fn my_slots(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(params): Query<MySlotsQuery>,
) -> Result<Json<Vec<SlotWithBookings>>, ApiError> {
    let company_id = user.require_company_id()?;

    let slots = app_state
        .slot_repository
        .list_for_company(company_id, params.event_id)
        .await?;

    Ok(Json(slots))
}

/// POST /api/slots
pub async fn create_slot(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(payload): Json<SlotCreate>,
) -> Result<Json<EventSlot>, ApiError> {
    let company_id = user.require_company_id()?;

    let slot = app_state.slot_service.create_slot(company_id, &payload).await?;

    tracing::info!(slot_id = %slot.id, company_id = %company_id, "slot created");
    Ok(Json(slot))
}

/// PATCH /api/slots/:id - owner or admin
pub async fn update_slot(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SlotUpdate>,
) -> Result<Json<EventSlot>, ApiError> {
    let slot = app_state
        .slot_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Slot not found"))?;

    require_slot_owner(&user, slot.company_id)?;

    let slot = app_state.slot_repository.update(id, &payload).await?;
    Ok(Json(slot))
}

/// DELETE /api/slots/:id - refused while confirmed bookings exist
pub async fn delete_slot(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let slot = app_state
        .slot_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Slot not found"))?;

    require_slot_owner(&user, slot.company_id)?;

    app_state.slot_repository.delete(id).await?;

    tracing::info!(slot_id = %id, "slot deleted");
    Ok(Json(json!({ "message": "Slot deleted" })))
}

/// GET /api/slots/:id/conflict - advisory overlap check for the signed-in
/// student; never blocks booking
pub async fn check_conflict(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConflictCheckResponse>, ApiError> {
    user.require_role(Role::Student)?;
    let student_id = user.require_user_id()?;

    let response = app_state.booking_service.check_conflict(student_id, id).await?;
    Ok(Json(response))
}

fn require_slot_owner(user: &UserContext, slot_company_id: Uuid) -> Result<(), ApiError> {
    if user.has_role(Role::Admin) || user.company_id == Some(slot_company_id) {
        Ok(())
    } else {
        Err(ApiError::authorization("You can only manage your own slots"))
    }
}
