use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub student_id: Uuid,
    pub slot_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Booking joined with slot, company, offer and event names. Feeds the
/// student/company/admin list views and both export formats.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingDetail {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub company_name: String,
    pub offer_title: Option<String>,
    pub event_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingCreate {
    pub slot_id: Uuid,
    pub offer_id: Option<Uuid>,
}

/// Result of the transactional booking and cancellation procedures.
/// Rule violations are data (`success: false`), not transport errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub success: bool,
    pub message: String,
    pub booking_id: Option<Uuid>,
}

impl BookingOutcome {
    pub fn confirmed<T: Into<String>>(message: T, booking_id: Uuid) -> Self {
        Self {
            success: true,
            message: message.into(),
            booking_id: Some(booking_id),
        }
    }

    pub fn rejected<T: Into<String>>(message: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            booking_id: None,
        }
    }
}

/// Payload of the booking limit gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingLimit {
    pub can_book: bool,
    pub current_count: i64,
    pub max_allowed: i32,
    pub current_phase: i32,
    pub message: String,
}

/// Advisory overlap warning, never a hard block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictWarning {
    pub company_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub conflict: bool,
    pub warning: Option<ConflictWarning>,
}

/// Row filter shared by the booking list views and the exporters
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub student_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub include_cancelled: bool,
    pub limit: Option<i64>,
}

/// Half-open interval overlap. Slots sharing only a boundary instant
/// (one ends exactly when the other starts) do not overlap.
pub fn intervals_overlap(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && start_b < end_a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_partial_overlap_conflicts() {
        assert!(intervals_overlap(
            at(10, 0),
            at(10, 30),
            at(10, 15),
            at(10, 45)
        ));
    }

    #[test]
    fn test_containment_conflicts() {
        assert!(intervals_overlap(at(10, 0), at(11, 0), at(10, 15), at(10, 30)));
    }

    #[test]
    fn test_adjacent_slots_do_not_conflict() {
        assert!(!intervals_overlap(
            at(10, 0),
            at(10, 30),
            at(10, 30),
            at(11, 0)
        ));
    }

    #[test]
    fn test_disjoint_slots_do_not_conflict() {
        assert!(!intervals_overlap(at(10, 0), at(10, 30), at(12, 0), at(12, 30)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        assert!(intervals_overlap(
            at(10, 15),
            at(10, 45),
            at(10, 0),
            at(10, 30)
        ));
    }
}
