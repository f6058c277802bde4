use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Company, CompanyUpdate},
};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Company>, ApiError>;
    async fn get_by_profile(&self, profile_id: Uuid) -> Result<Option<Company>, ApiError>;
    async fn list(&self, verified_only: bool) -> Result<Vec<Company>, ApiError>;
    async fn update(&self, id: Uuid, update: &CompanyUpdate) -> Result<Company, ApiError>;
    async fn set_verified(&self, id: Uuid, verified: bool) -> Result<Company, ApiError>;
}

pub struct SqlxCompanyRepository {
    pool: PgPool,
}

impl SqlxCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for SqlxCompanyRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, profile_id, company_name, industry, website, description,
                   is_verified, created_at, updated_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_profile(&self, profile_id: Uuid) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, profile_id, company_name, industry, website, description,
                   is_verified, created_at, updated_at
            FROM companies
            WHERE profile_id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, verified_only: bool) -> Result<Vec<Company>, ApiError> {
        let rows = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, profile_id, company_name, industry, website, description,
                   is_verified, created_at, updated_at
            FROM companies
            WHERE (NOT $1 OR is_verified)
            ORDER BY company_name
            "#,
        )
        .bind(verified_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: Uuid, update: &CompanyUpdate) -> Result<Company, ApiError> {
        let row = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET company_name = COALESCE($2, company_name),
                industry = COALESCE($3, industry),
                website = COALESCE($4, website),
                description = COALESCE($5, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, profile_id, company_name, industry, website, description,
                      is_verified, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.company_name)
        .bind(&update.industry)
        .bind(&update.website)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::not_found("Company not found"))
    }

    async fn set_verified(&self, id: Uuid, verified: bool) -> Result<Company, ApiError> {
        let row = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET is_verified = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, profile_id, company_name, industry, website, description,
                      is_verified, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(verified)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::not_found("Company not found"))
    }
}
