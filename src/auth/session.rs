use crate::auth::rbac::Role;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session payload serialized into the encrypted private cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub company_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub session_id: String,
}

impl UserSession {
    pub fn new(
        user_id: Uuid,
        email: String,
        role: Role,
        company_id: Option<Uuid>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            user_id,
            email,
            role,
            company_id,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
