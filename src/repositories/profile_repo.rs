use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::Role,
    error::ApiError,
    models::{NewAccount, Profile, ProfileFlagsUpdate, ProfileUpdate},
    repositories::is_unique_violation,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create_account(&self, account: &NewAccount) -> Result<Profile, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError>;
    async fn list_by_role(&self, role: Option<Role>) -> Result<Vec<Profile>, ApiError>;
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile, ApiError>;
    async fn update_flags(
        &self,
        id: Uuid,
        update: &ProfileFlagsUpdate,
    ) -> Result<Profile, ApiError>;
    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError>;
}

pub struct SqlxProfileRepository {
    pool: PgPool,
}

impl SqlxProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepository {
    /// Profile and, for company accounts, the company row are created in
    /// one transaction. A company account never exists without its
    /// company row.
    async fn create_account(&self, account: &NewAccount) -> Result<Profile, ApiError> {
        let mut tx = self.pool.begin().await?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (email, password_hash, full_name, role, phone, account_approved)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, full_name, role, phone,
                      is_deprioritized, account_approved, created_at, updated_at, last_login_at
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.full_name)
        .bind(account.role)
        .bind(&account.phone)
        .bind(account.account_approved)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("An account with this email already exists".to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

        if let Some(company_name) = &account.company_name {
            sqlx::query(
                r#"
                INSERT INTO companies (profile_id, company_name)
                VALUES ($1, $2)
                "#,
            )
            .bind(profile.id)
            .bind(company_name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(profile)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, ApiError> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, password_hash, full_name, role, phone,
                   is_deprioritized, account_approved, created_at, updated_at, last_login_at
            FROM profiles
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, password_hash, full_name, role, phone,
                   is_deprioritized, account_approved, created_at, updated_at, last_login_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_role(&self, role: Option<Role>) -> Result<Vec<Profile>, ApiError> {
        let rows = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, password_hash, full_name, role, phone,
                   is_deprioritized, account_approved, created_at, updated_at, last_login_at
            FROM profiles
            WHERE ($1::user_role IS NULL OR role = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, full_name, role, phone,
                      is_deprioritized, account_approved, created_at, updated_at, last_login_at
            "#,
        )
        .bind(id)
        .bind(&update.full_name)
        .bind(&update.phone)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::not_found("Profile not found"))
    }

    async fn update_flags(
        &self,
        id: Uuid,
        update: &ProfileFlagsUpdate,
    ) -> Result<Profile, ApiError> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET account_approved = COALESCE($2, account_approved),
                is_deprioritized = COALESCE($3, is_deprioritized),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, full_name, role, phone,
                      is_deprioritized, account_approved, created_at, updated_at, last_login_at
            "#,
        )
        .bind(id)
        .bind(update.account_approved)
        .bind(update.is_deprioritized)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::not_found("Profile not found"))
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError> {
        sqlx::query("UPDATE profiles SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
