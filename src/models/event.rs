use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub is_active: bool,
    pub current_phase: i32,
    pub phase1_max_bookings: i32,
    pub phase2_max_bookings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Phase and booking quota applying to a student right now.
    /// Deprioritized students stay on the phase 1 quota even after the
    /// event moves to phase 2.
    pub fn phase_quota(&self, deprioritized: bool) -> (i32, i32) {
        let max = if deprioritized || self.current_phase < 2 {
            self.phase1_max_bookings
        } else {
            self.phase2_max_bookings
        };
        (self.current_phase, max)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventCreate {
    pub name: String,
    pub event_date: NaiveDate,
    pub phase1_max_bookings: Option<i32>,
    pub phase2_max_bookings: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub current_phase: Option<i32>,
    pub phase1_max_bookings: Option<i32>,
    pub phase2_max_bookings: Option<i32>,
}
