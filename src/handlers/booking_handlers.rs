use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Role},
    error::ApiError,
    models::{BookingCreate, BookingDetail, BookingFilter, BookingOutcome},
    services::BookingSubmission,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct MyBookingsQuery {
    #[serde(default)]
    include_cancelled: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminBookingsQuery {
    event_id: Option<Uuid>,
    #[serde(default)]
    include_cancelled: bool,
}

/// POST /api/bookings - submit a booking. Rule violations come back as
/// HTTP 200 with `success: false`; only transport failures use error codes.
pub async fn create_booking(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(payload): Json<BookingCreate>,
) -> Result<Json<BookingSubmission>, ApiError> {
    user.require_role(Role::Student)?;
    let student_id = user.require_user_id()?;

    let submission = app_state.booking_service.book(student_id, &payload).await?;
    Ok(Json(submission))
}

/// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingOutcome>, ApiError> {
    user.require_role(Role::Student)?;
    let student_id = user.require_user_id()?;

    let outcome = app_state
        .booking_repository
        .cancel_booking(id, student_id)
        .await?;

    Ok(Json(outcome))
}

/// GET /api/bookings/mine?include_cancelled
pub async fn my_bookings(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(params): Query<MyBookingsQuery>,
) -> Result<Json<Vec<BookingDetail>>, ApiError> {
    let student_id = user.require_user_id()?;

    let filter = BookingFilter {
        student_id: Some(student_id),
        include_cancelled: params.include_cancelled,
        ..Default::default()
    };

    let bookings = app_state.booking_repository.list_details(&filter).await?;
    Ok(Json(bookings))
}

/// GET /api/companies/me/bookings - confirmed bookings on the company's slots
pub async fn company_bookings(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<BookingDetail>>, ApiError> {
    let company_id = user.require_company_id()?;

    let filter = BookingFilter {
        company_id: Some(company_id),
        ..Default::default()
    };

    let bookings = app_state.booking_repository.list_details(&filter).await?;
    Ok(Json(bookings))
}

/// GET /api/admin/bookings?event_id - event-wide view for admins
pub async fn admin_bookings(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(params): Query<AdminBookingsQuery>,
) -> Result<Json<Vec<BookingDetail>>, ApiError> {
    user.require_role(Role::Admin)?;

    let filter = BookingFilter {
        event_id: params.event_id,
        include_cancelled: params.include_cancelled,
        ..Default::default()
    };

    let bookings = app_state.booking_repository.list_details(&filter).await?;
    Ok(Json(bookings))
}
