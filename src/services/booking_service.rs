use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{
        intervals_overlap, BookingCreate, BookingFilter, BookingLimit, ConflictCheckResponse,
        ConflictWarning,
    },
    repositories::{BookingRepository, EventRepository, ProfileRepository, SlotRepository},
};

/// Booking outcome plus the advisory conflict warning, so clients get the
/// soft check and the hard result in one round trip.
#[derive(Debug, Clone, Serialize)]
pub struct BookingSubmission {
    pub success: bool,
    pub message: String,
    pub booking_id: Option<Uuid>,
    pub warning: Option<ConflictWarning>,
}

pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository + Send + Sync>,
    slot_repo: Arc<dyn SlotRepository + Send + Sync>,
    event_repo: Arc<dyn EventRepository + Send + Sync>,
    profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
}

impl BookingService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository + Send + Sync>,
        slot_repo: Arc<dyn SlotRepository + Send + Sync>,
        event_repo: Arc<dyn EventRepository + Send + Sync>,
        profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        Self {
            booking_repo,
            slot_repo,
            event_repo,
            profile_repo,
        }
    }

    /// Quota state for a student on an event. Deprioritized students keep
    /// the phase 1 quota after the event advances.
    pub async fn check_booking_limit(
        &self,
        student_id: Uuid,
        event_id: Uuid,
    ) -> Result<BookingLimit, ApiError> {
        let event = self
            .event_repo
            .get_by_id(event_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))?;

        let profile = self
            .profile_repo
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Student profile not found"))?;

        let current_count = self
            .booking_repo
            .count_confirmed_for_event(student_id, event_id)
            .await?;

        let (current_phase, max_allowed) = event.phase_quota(profile.is_deprioritized);
        let can_book = current_count < i64::from(max_allowed);

        let message = if can_book {
            format!(
                "You can book {} more interview(s) in phase {current_phase}",
                i64::from(max_allowed) - current_count
            )
        } else {
            format!(
                "Booking limit reached: {current_count} of {max_allowed} bookings used in phase {current_phase}"
            )
        };

        Ok(BookingLimit {
            can_book,
            current_count,
            max_allowed,
            current_phase,
            message,
        })
    }

    /// Advisory overlap check against the student's confirmed bookings.
    /// Never blocks anything; the booking transaction is the enforcement
    /// point.
    pub async fn check_conflict(
        &self,
        student_id: Uuid,
        slot_id: Uuid,
    ) -> Result<ConflictCheckResponse, ApiError> {
        let slot = self
            .slot_repo
            .get_by_id(slot_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Slot not found"))?;

        let warning = self
            .overlap_warning(student_id, slot.start_time, slot.end_time)
            .await?;

        Ok(ConflictCheckResponse {
            conflict: warning.is_some(),
            warning,
        })
    }

    /// Submit a booking. The advisory warning is computed first and carried
    /// on the response either way; the authoritative decision is the
    /// repository transaction's.
    pub async fn book(
        &self,
        student_id: Uuid,
        create: &BookingCreate,
    ) -> Result<BookingSubmission, ApiError> {
        let warning = match self.slot_repo.get_by_id(create.slot_id).await? {
            Some(slot) => {
                self.overlap_warning(student_id, slot.start_time, slot.end_time)
                    .await?
            }
            None => None,
        };

        let outcome = self
            .booking_repo
            .book_interview(student_id, create.slot_id, create.offer_id)
            .await?;

        Ok(BookingSubmission {
            success: outcome.success,
            message: outcome.message,
            booking_id: outcome.booking_id,
            warning,
        })
    }

    async fn overlap_warning(
        &self,
        student_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Option<ConflictWarning>, ApiError> {
        let confirmed = self
            .booking_repo
            .list_details(&BookingFilter {
                student_id: Some(student_id),
                ..Default::default()
            })
            .await?;

        Ok(confirmed
            .iter()
            .find(|booking| {
                intervals_overlap(start_time, end_time, booking.start_time, booking.end_time)
            })
            .map(|booking| ConflictWarning {
                company_name: booking.company_name.clone(),
                start_time: booking.start_time,
                end_time: booking.end_time,
                message: format!(
                    "You already have an interview with {} from {} to {}",
                    booking.company_name,
                    booking.start_time.format("%Y-%m-%d %H:%M"),
                    booking.end_time.format("%H:%M"),
                ),
            }))
    }
}
