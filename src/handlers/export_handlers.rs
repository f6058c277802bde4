use axum::{
    extract::{Extension, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Role},
    error::ApiError,
    models::BookingFilter,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct CsvExportQuery {
    event_id: Option<Uuid>,
    #[serde(default)]
    include_cancelled: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct PdfExportQuery {
    event_id: Option<Uuid>,
}

/// GET /api/export/bookings.csv?event_id&include_cancelled
pub async fn export_bookings_csv(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(params): Query<CsvExportQuery>,
) -> Result<Response, ApiError> {
    let filter = scoped_filter(&user, params.event_id, params.include_cancelled)?;

    let rows = app_state.export_service.export_rows(&filter).await?;
    let csv = app_state.export_service.to_csv(&rows);

    tracing::info!(rows = rows.len(), "bookings exported as CSV");
    download_response(csv.into_bytes(), "text/csv; charset=utf-8", "csv")
}

/// GET /api/export/bookings.pdf?event_id
pub async fn export_bookings_pdf(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(params): Query<PdfExportQuery>,
) -> Result<Response, ApiError> {
    let filter = scoped_filter(&user, params.event_id, false)?;

    let rows = app_state.export_service.export_rows(&filter).await?;
    let pdf = app_state.export_service.to_pdf(&rows, "Interview Bookings")?;

    tracing::info!(rows = rows.len(), "bookings exported as PDF");
    download_response(pdf, "application/pdf", "pdf")
}

/// Rows each role is allowed to export: students their own bookings,
/// companies the bookings on their slots, admins everything.
fn scoped_filter(
    user: &UserContext,
    event_id: Option<Uuid>,
    include_cancelled: bool,
) -> Result<BookingFilter, ApiError> {
    let mut filter = BookingFilter {
        event_id,
        include_cancelled,
        ..Default::default()
    };

    match user.role {
        Role::Student => filter.student_id = Some(user.require_user_id()?),
        Role::Company => filter.company_id = Some(user.require_company_id()?),
        Role::Admin => {}
    }

    Ok(filter)
}

fn download_response(
    body: Vec<u8>,
    content_type: &str,
    extension: &str,
) -> Result<Response, ApiError> {
    let filename = format!(
        "bookings-{}.{}",
        chrono::Utc::now().format("%Y%m%d-%H%M%S"),
        extension
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(axum::body::Body::from(body))
        .map_err(|e| ApiError::internal(format!("Failed to create response: {}", e)))
}
