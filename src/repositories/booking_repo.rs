use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{BookingDetail, BookingFilter, BookingOutcome, Event, EventSlot},
    repositories::is_unique_violation,
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Attempt to book an interview. Rule violations come back as a
    /// rejected [`BookingOutcome`]; only transport failures are errors.
    async fn book_interview(
        &self,
        student_id: Uuid,
        slot_id: Uuid,
        offer_id: Option<Uuid>,
    ) -> Result<BookingOutcome, ApiError>;

    async fn cancel_booking(
        &self,
        booking_id: Uuid,
        student_id: Uuid,
    ) -> Result<BookingOutcome, ApiError>;

    async fn list_details(&self, filter: &BookingFilter) -> Result<Vec<BookingDetail>, ApiError>;

    async fn count_confirmed_for_event(
        &self,
        student_id: Uuid,
        event_id: Uuid,
    ) -> Result<i64, ApiError>;
}

pub struct SqlxBookingRepository {
    pool: PgPool,
}

impl SqlxBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqlxBookingRepository {
    async fn book_interview(
        &self,
        student_id: Uuid,
        slot_id: Uuid,
        offer_id: Option<Uuid>,
    ) -> Result<BookingOutcome, ApiError> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the slot serializes concurrent attempts; every check
        // below sees a settled booking count.
        let slot = sqlx::query_as::<_, EventSlot>(
            r#"
            SELECT id, company_id, event_id, offer_id, start_time, end_time,
                   capacity, is_active, created_at
            FROM event_slots
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(slot_id)
        .fetch_optional(&mut *tx)
        .await?;

        let slot = match slot {
            Some(slot) => slot,
            None => return Ok(BookingOutcome::rejected("Slot not found")),
        };
        if !slot.is_active {
            return Ok(BookingOutcome::rejected("Slot is no longer available"));
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, event_date, is_active, current_phase,
                   phase1_max_bookings, phase2_max_bookings, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(slot.event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let event = match event {
            Some(event) if event.is_active => event,
            _ => return Ok(BookingOutcome::rejected("Event is not active")),
        };

        let profile = sqlx::query_as::<_, (bool, bool)>(
            r#"
            SELECT account_approved, is_deprioritized
            FROM profiles
            WHERE id = $1 AND role = 'student'
            "#,
        )
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (account_approved, is_deprioritized) = match profile {
            Some(flags) => flags,
            None => return Ok(BookingOutcome::rejected("Student profile not found")),
        };
        if !account_approved {
            return Ok(BookingOutcome::rejected("Your account is awaiting approval"));
        }

        let confirmed_on_slot = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE slot_id = $1 AND status = 'confirmed'",
        )
        .bind(slot_id)
        .fetch_one(&mut *tx)
        .await?;

        if confirmed_on_slot >= slot.effective_capacity() {
            return Ok(BookingOutcome::rejected("Slot is fully booked"));
        }

        let already_booked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE student_id = $1 AND slot_id = $2 AND status = 'confirmed'
            )
            "#,
        )
        .bind(student_id)
        .bind(slot_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_booked {
            return Ok(BookingOutcome::rejected("You already booked this slot"));
        }

        // Half-open interval overlap against every confirmed booking of the
        // student. Back-to-back slots sharing a boundary instant pass.
        let clash = sqlx::query_as::<_, (String, DateTime<Utc>, DateTime<Utc>)>(
            r#"
            SELECT c.company_name, s.start_time, s.end_time
            FROM bookings b
            JOIN event_slots s ON s.id = b.slot_id
            JOIN companies c ON c.id = s.company_id
            WHERE b.student_id = $1
              AND b.status = 'confirmed'
              AND s.start_time < $3
              AND s.end_time > $2
            ORDER BY s.start_time
            LIMIT 1
            "#,
        )
        .bind(student_id)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((company_name, start, end)) = clash {
            return Ok(BookingOutcome::rejected(format!(
                "You already have an interview with {} from {} to {}",
                company_name,
                start.format("%Y-%m-%d %H:%M"),
                end.format("%H:%M"),
            )));
        }

        let confirmed_in_event = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM bookings b
            JOIN event_slots s ON s.id = b.slot_id
            WHERE b.student_id = $1
              AND b.status = 'confirmed'
              AND s.event_id = $2
            "#,
        )
        .bind(student_id)
        .bind(slot.event_id)
        .fetch_one(&mut *tx)
        .await?;

        let (phase, max_allowed) = event.phase_quota(is_deprioritized);
        if confirmed_in_event >= i64::from(max_allowed) {
            return Ok(BookingOutcome::rejected(format!(
                "Booking limit reached: {confirmed_in_event} of {max_allowed} bookings used in phase {phase}"
            )));
        }

        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO bookings (student_id, slot_id, offer_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(student_id)
        .bind(slot_id)
        .bind(offer_id.or(slot.offer_id))
        .fetch_one(&mut *tx)
        .await;

        // The partial unique index backstops the duplicate check for
        // transactions that raced past it.
        let booking_id = match inserted {
            Ok(id) => id,
            Err(ref err) if is_unique_violation(err) => {
                return Ok(BookingOutcome::rejected("You already booked this slot"));
            }
            Err(err) => return Err(err.into()),
        };

        tx.commit().await?;

        tracing::info!(
            booking_id = %booking_id,
            student_id = %student_id,
            slot_id = %slot_id,
            "interview booked"
        );

        Ok(BookingOutcome::confirmed(
            "Interview booked successfully",
            booking_id,
        ))
    }

    async fn cancel_booking(
        &self,
        booking_id: Uuid,
        student_id: Uuid,
    ) -> Result<BookingOutcome, ApiError> {
        let cancelled = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE bookings
            SET status = 'cancelled', cancelled_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND student_id = $2 AND status = 'confirmed'
            RETURNING id
            "#,
        )
        .bind(booking_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        match cancelled {
            Some(id) => {
                tracing::info!(booking_id = %id, student_id = %student_id, "booking cancelled");
                Ok(BookingOutcome::confirmed("Booking cancelled", id))
            }
            None => Ok(BookingOutcome::rejected(
                "Booking not found or already cancelled",
            )),
        }
    }

    async fn list_details(&self, filter: &BookingFilter) -> Result<Vec<BookingDetail>, ApiError> {
        let rows = sqlx::query_as::<_, BookingDetail>(
            r#"
            SELECT b.id, b.student_id, p.full_name AS student_name, p.email AS student_email,
                   c.company_name, o.title AS offer_title, e.name AS event_name,
                   s.start_time, s.end_time, b.status, b.created_at
            FROM bookings b
            JOIN event_slots s ON s.id = b.slot_id
            JOIN companies c ON c.id = s.company_id
            JOIN events e ON e.id = s.event_id
            JOIN profiles p ON p.id = b.student_id
            LEFT JOIN offers o ON o.id = b.offer_id
            WHERE ($1::uuid IS NULL OR b.student_id = $1)
              AND ($2::uuid IS NULL OR s.company_id = $2)
              AND ($3::uuid IS NULL OR s.event_id = $3)
              AND ($4 OR b.status = 'confirmed')
            ORDER BY s.start_time
            LIMIT $5
            "#,
        )
        .bind(filter.student_id)
        .bind(filter.company_id)
        .bind(filter.event_id)
        .bind(filter.include_cancelled)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_confirmed_for_event(
        &self,
        student_id: Uuid,
        event_id: Uuid,
    ) -> Result<i64, ApiError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM bookings b
            JOIN event_slots s ON s.id = b.slot_id
            WHERE b.student_id = $1
              AND b.status = 'confirmed'
              AND s.event_id = $2
            "#,
        )
        .bind(student_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
