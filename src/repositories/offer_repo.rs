use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Offer, OfferCreate, OfferSearch, OfferUpdate, OfferWithCompany},
};

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn create(&self, company_id: Uuid, offer: &OfferCreate) -> Result<Offer, ApiError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Offer>, ApiError>;
    async fn get_with_company(&self, id: Uuid) -> Result<Option<OfferWithCompany>, ApiError>;
    async fn search(&self, search: &OfferSearch) -> Result<Vec<OfferWithCompany>, ApiError>;
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<Offer>, ApiError>;
    async fn update(&self, id: Uuid, update: &OfferUpdate) -> Result<Offer, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub struct SqlxOfferRepository {
    pool: PgPool,
}

impl SqlxOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferRepository for SqlxOfferRepository {
    async fn create(&self, company_id: Uuid, offer: &OfferCreate) -> Result<Offer, ApiError> {
        let row = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (company_id, event_id, title, description, interest_tag)
            VALUES ($1, $2, $3, COALESCE($4, ''), $5)
            RETURNING id, company_id, event_id, title, description, interest_tag,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(company_id)
        .bind(offer.event_id)
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(&offer.interest_tag)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Offer>, ApiError> {
        let row = sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, company_id, event_id, title, description, interest_tag,
                   is_active, created_at, updated_at
            FROM offers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_with_company(&self, id: Uuid) -> Result<Option<OfferWithCompany>, ApiError> {
        let row = sqlx::query_as::<_, OfferWithCompany>(
            r#"
            SELECT o.id, o.company_id, o.event_id, o.title, o.description, o.interest_tag,
                   o.is_active, c.company_name, o.created_at, o.updated_at
            FROM offers o
            JOIN companies c ON c.id = o.company_id
            WHERE o.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Catalog query: active offers of verified companies only.
    async fn search(&self, search: &OfferSearch) -> Result<Vec<OfferWithCompany>, ApiError> {
        let rows = sqlx::query_as::<_, OfferWithCompany>(
            r#"
            SELECT o.id, o.company_id, o.event_id, o.title, o.description, o.interest_tag,
                   o.is_active, c.company_name, o.created_at, o.updated_at
            FROM offers o
            JOIN companies c ON c.id = o.company_id
            WHERE o.is_active
              AND c.is_verified
              AND ($1::uuid IS NULL OR o.event_id = $1)
              AND ($2::uuid IS NULL OR o.company_id = $2)
              AND ($3::text IS NULL OR o.interest_tag = $3)
              AND ($4::text IS NULL
                   OR o.title ILIKE '%' || $4 || '%'
                   OR o.description ILIKE '%' || $4 || '%')
            ORDER BY c.company_name, o.title
            "#,
        )
        .bind(search.event_id)
        .bind(search.company_id)
        .bind(&search.tag)
        .bind(&search.q)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<Offer>, ApiError> {
        let rows = sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, company_id, event_id, title, description, interest_tag,
                   is_active, created_at, updated_at
            FROM offers
            WHERE company_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: Uuid, update: &OfferUpdate) -> Result<Offer, ApiError> {
        let row = sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                interest_tag = COALESCE($4, interest_tag),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, company_id, event_id, title, description, interest_tag,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.interest_tag)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::not_found("Offer not found"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
