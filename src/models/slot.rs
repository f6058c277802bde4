use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A slot with NULL capacity behaves as capacity 1.
fn effective_capacity(capacity: Option<i32>) -> i64 {
    i64::from(capacity.unwrap_or(1).max(1))
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EventSlot {
    pub id: Uuid,
    pub event_id: Uuid,
    pub company_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl EventSlot {
    pub fn effective_capacity(&self) -> i64 {
        effective_capacity(self.capacity)
    }
}

/// Slot row with its confirmed-booking count, produced by a single
/// LEFT JOIN aggregate in the slot repository.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SlotWithBookings {
    pub id: Uuid,
    pub event_id: Uuid,
    pub company_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub bookings_count: i64,
}

impl SlotWithBookings {
    pub fn effective_capacity(&self) -> i64 {
        effective_capacity(self.capacity)
    }

    pub fn remaining(&self) -> i64 {
        (self.effective_capacity() - self.bookings_count).max(0)
    }

    pub fn has_remaining_capacity(&self) -> bool {
        self.bookings_count < self.effective_capacity()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotCreate {
    pub event_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotUpdate {
    pub is_active: Option<bool>,
    pub capacity: Option<i32>,
}

/// Student-facing availability row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub id: Uuid,
    pub event_id: Uuid,
    pub company_id: Uuid,
    pub offer_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i64,
    pub bookings_count: i64,
    pub remaining: i64,
}

impl From<&SlotWithBookings> for SlotAvailability {
    fn from(slot: &SlotWithBookings) -> Self {
        Self {
            id: slot.id,
            event_id: slot.event_id,
            company_id: slot.company_id,
            offer_id: slot.offer_id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            capacity: slot.effective_capacity(),
            bookings_count: slot.bookings_count,
            remaining: slot.remaining(),
        }
    }
}

/// `includes_past` flags the fallback to already-started slots when no
/// future slot exists for the company and event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailabilityResponse {
    pub slots: Vec<SlotAvailability>,
    pub includes_past: bool,
}
