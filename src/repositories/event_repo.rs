use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Event, EventCreate, EventUpdate},
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &EventCreate) -> Result<Event, ApiError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>, ApiError>;
    async fn list(&self, active_only: bool) -> Result<Vec<Event>, ApiError>;
    async fn update(&self, id: Uuid, update: &EventUpdate) -> Result<Event, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub struct SqlxEventRepository {
    pool: PgPool,
}

impl SqlxEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqlxEventRepository {
    async fn create(&self, event: &EventCreate) -> Result<Event, ApiError> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, event_date, phase1_max_bookings, phase2_max_bookings)
            VALUES ($1, $2, COALESCE($3, 3), COALESCE($4, 5))
            RETURNING id, name, event_date, is_active, current_phase,
                      phase1_max_bookings, phase2_max_bookings, created_at, updated_at
            "#,
        )
        .bind(&event.name)
        .bind(event.event_date)
        .bind(event.phase1_max_bookings)
        .bind(event.phase2_max_bookings)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>, ApiError> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, event_date, is_active, current_phase,
                   phase1_max_bookings, phase2_max_bookings, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Event>, ApiError> {
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, event_date, is_active, current_phase,
                   phase1_max_bookings, phase2_max_bookings, created_at, updated_at
            FROM events
            WHERE (NOT $1 OR is_active)
            ORDER BY event_date
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: Uuid, update: &EventUpdate) -> Result<Event, ApiError> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                event_date = COALESCE($3, event_date),
                is_active = COALESCE($4, is_active),
                current_phase = COALESCE($5, current_phase),
                phase1_max_bookings = COALESCE($6, phase1_max_bookings),
                phase2_max_bookings = COALESCE($7, phase2_max_bookings),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, event_date, is_active, current_phase,
                      phase1_max_bookings, phase2_max_bookings, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.event_date)
        .bind(update.is_active)
        .bind(update.current_phase)
        .bind(update.phase1_max_bookings)
        .bind(update.phase2_max_bookings)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::not_found("Event not found"))
    }

    /// Offers, slots and bookings under the event go with it via
    /// ON DELETE CASCADE.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
