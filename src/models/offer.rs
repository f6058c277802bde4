use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub company_id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub interest_tag: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog row: offer joined with its company name
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OfferWithCompany {
    pub id: Uuid,
    pub company_id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub interest_tag: Option<String>,
    pub is_active: bool,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferCreate {
    pub event_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub interest_tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub interest_tag: Option<String>,
    pub is_active: Option<bool>,
}

/// Catalog search filter; `q` matches title and description
#[derive(Debug, Clone, Default)]
pub struct OfferSearch {
    pub q: Option<String>,
    pub event_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub tag: Option<String>,
}
