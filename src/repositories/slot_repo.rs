use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{EventSlot, SlotCreate, SlotUpdate, SlotWithBookings},
};

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn create(&self, company_id: Uuid, slot: &SlotCreate) -> Result<EventSlot, ApiError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<EventSlot>, ApiError>;
    async fn get_with_bookings(&self, id: Uuid) -> Result<Option<SlotWithBookings>, ApiError>;

    /// Active slots starting at or after `now`, with confirmed-booking counts.
    async fn list_future(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SlotWithBookings>, ApiError>;

    /// Active slots that already started before `now`. Fallback data for
    /// events whose slot times were entered in the past.
    async fn list_past(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SlotWithBookings>, ApiError>;

    async fn list_for_company(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
    ) -> Result<Vec<SlotWithBookings>, ApiError>;

    async fn update(&self, id: Uuid, update: &SlotUpdate) -> Result<EventSlot, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub struct SqlxSlotRepository {
    pool: PgPool,
}

impl SqlxSlotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for SqlxSlotRepository {
    async fn create(&self, company_id: Uuid, slot: &SlotCreate) -> Result<EventSlot, ApiError> {
        if slot.start_time >= slot.end_time {
            return Err(ApiError::validation("Slot must start before it ends"));
        }
        if let Some(capacity) = slot.capacity {
            if capacity < 1 {
                return Err(ApiError::validation("Capacity must be at least 1"));
            }
        }

        let row = sqlx::query_as::<_, EventSlot>(
            r#"
            INSERT INTO event_slots (company_id, event_id, offer_id, start_time, end_time, capacity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, company_id, event_id, offer_id, start_time, end_time,
                      capacity, is_active, created_at
            "#,
        )
        .bind(company_id)
        .bind(slot.event_id)
        .bind(slot.offer_id)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<EventSlot>, ApiError> {
        let row = sqlx::query_as::<_, EventSlot>(
            r#"
            SELECT id, company_id, event_id, offer_id, start_time, end_time,
                   capacity, is_active, created_at
            FROM event_slots
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_with_bookings(&self, id: Uuid) -> Result<Option<SlotWithBookings>, ApiError> {
        let row = sqlx::query_as::<_, SlotWithBookings>(
            r#"
            SELECT s.id, s.company_id, s.event_id, s.offer_id, s.start_time, s.end_time,
                   s.capacity, s.is_active, s.created_at,
                   COUNT(b.id) FILTER (WHERE b.status = 'confirmed') AS bookings_count
            FROM event_slots s
            LEFT JOIN bookings b ON b.slot_id = s.id
            WHERE s.id = $1
            GROUP BY s.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_future(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SlotWithBookings>, ApiError> {
        let rows = sqlx::query_as::<_, SlotWithBookings>(
            r#"
            SELECT s.id, s.company_id, s.event_id, s.offer_id, s.start_time, s.end_time,
                   s.capacity, s.is_active, s.created_at,
                   COUNT(b.id) FILTER (WHERE b.status = 'confirmed') AS bookings_count
            FROM event_slots s
            LEFT JOIN bookings b ON b.slot_id = s.id
            WHERE s.company_id = $1
              AND ($2::uuid IS NULL OR s.event_id = $2)
              AND s.is_active
              AND s.start_time >= $3
            GROUP BY s.id
            ORDER BY s.start_time
            "#,
        )
        .bind(company_id)
        .bind(event_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_past(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SlotWithBookings>, ApiError> {
        let rows = sqlx::query_as::<_, SlotWithBookings>(
            r#"
            SELECT s.id, s.company_id, s.event_id, s.offer_id, s.start_time, s.end_time,
                   s.capacity, s.is_active, s.created_at,
                   COUNT(b.id) FILTER (WHERE b.status = 'confirmed') AS bookings_count
            FROM event_slots s
            LEFT JOIN bookings b ON b.slot_id = s.id
            WHERE s.company_id = $1
              AND ($2::uuid IS NULL OR s.event_id = $2)
              AND s.is_active
              AND s.start_time < $3
            GROUP BY s.id
            ORDER BY s.start_time
            "#,
        )
        .bind(company_id)
        .bind(event_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_for_company(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
    ) -> Result<Vec<SlotWithBookings>, ApiError> {
        let rows = sqlx::query_as::<_, SlotWithBookings>(
            r#"
            SELECT s.id, s.company_id, s.event_id, s.offer_id, s.start_time, s.end_time,
                   s.capacity, s.is_active, s.created_at,
                   COUNT(b.id) FILTER (WHERE b.status = 'confirmed') AS bookings_count
            FROM event_slots s
            LEFT JOIN bookings b ON b.slot_id = s.id
            WHERE s.company_id = $1
              AND ($2::uuid IS NULL OR s.event_id = $2)
            GROUP BY s.id
            ORDER BY s.start_time
            "#,
        )
        .bind(company_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: Uuid, update: &SlotUpdate) -> Result<EventSlot, ApiError> {
        if let Some(capacity) = update.capacity {
            if capacity < 1 {
                return Err(ApiError::validation("Capacity must be at least 1"));
            }
        }

        let row = sqlx::query_as::<_, EventSlot>(
            r#"
            UPDATE event_slots
            SET capacity = COALESCE($2, capacity),
                is_active = COALESCE($3, is_active)
            WHERE id = $1
            RETURNING id, company_id, event_id, offer_id, start_time, end_time,
                      capacity, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(update.capacity)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::not_found("Slot not found"))
    }

    /// A slot with confirmed bookings cannot be deleted; the bookings
    /// must be cancelled first.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tx = self.pool.begin().await?;

        let has_confirmed = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE slot_id = $1 AND status = 'confirmed'
            )
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if has_confirmed {
            return Err(ApiError::conflict(
                "Cannot delete a slot with confirmed bookings",
            ));
        }

        let result = sqlx::query("DELETE FROM event_slots WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
