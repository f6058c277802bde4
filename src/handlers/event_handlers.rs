use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Role},
    error::ApiError,
    models::{BookingLimit, Event, EventCreate, EventUpdate},
    AppState,
};

/// GET /api/events - events currently open for booking
pub async fn list_events(State(app_state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = app_state.event_repository.list(true).await?;
    Ok(Json(events))
}

/// GET /api/events/:id
pub async fn get_event(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = app_state
        .event_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    Ok(Json(event))
}

/// GET /api/events/:id/booking-limit - quota state for the signed-in student
pub async fn get_booking_limit(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingLimit>, ApiError> {
    user.require_role(Role::Student)?;
    let student_id = user.require_user_id()?;

    let limit = app_state
        .booking_service
        .check_booking_limit(student_id, id)
        .await?;

    Ok(Json(limit))
}

/// GET /api/admin/events - all events including inactive ones
pub async fn list_all_events(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<Event>>, ApiError> {
    user.require_role(Role::Admin)?;

    let events = app_state.event_repository.list(false).await?;
    Ok(Json(events))
}

/// POST /api/admin/events
pub async fn create_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(payload): Json<EventCreate>,
) -> Result<Json<Event>, ApiError> {
    user.require_role(Role::Admin)?;

    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Event name cannot be empty"));
    }
    validate_quota(payload.phase1_max_bookings)?;
    validate_quota(payload.phase2_max_bookings)?;

    let event = app_state.event_repository.create(&payload).await?;

    tracing::info!(event_id = %event.id, name = %event.name, "event created");
    Ok(Json(event))
}

/// PATCH /api/admin/events/:id - rename, move, toggle, advance phase,
/// adjust quotas
pub async fn update_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EventUpdate>,
) -> Result<Json<Event>, ApiError> {
    user.require_role(Role::Admin)?;

    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(ApiError::validation("Event name cannot be empty"));
        }
    }
    if let Some(phase) = payload.current_phase {
        if !(1..=2).contains(&phase) {
            return Err(ApiError::validation("Phase must be 1 or 2"));
        }
    }
    validate_quota(payload.phase1_max_bookings)?;
    validate_quota(payload.phase2_max_bookings)?;

    let event = app_state.event_repository.update(id, &payload).await?;
    Ok(Json(event))
}

/// DELETE /api/admin/events/:id - cascades to offers, slots and bookings
pub async fn delete_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require_role(Role::Admin)?;

    let deleted = app_state.event_repository.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Event not found"));
    }

    tracing::info!(event_id = %id, "event deleted");
    Ok(Json(json!({ "message": "Event deleted" })))
}

fn validate_quota(quota: Option<i32>) -> Result<(), ApiError> {
    match quota {
        Some(value) if value < 1 => Err(ApiError::validation("Booking quota must be at least 1")),
        _ => Ok(()),
    }
}
