use crate::auth::rbac::{Permission, Role};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: Option<Uuid>, // None for API Key (or service user)
    pub email: Option<String>,
    pub role: Role,
    pub company_id: Option<Uuid>, // resolved at login for company accounts
    pub is_api_key: bool,
}

impl UserContext {
    pub fn new_user(user_id: Uuid, email: String, role: Role, company_id: Option<Uuid>) -> Self {
        Self {
            user_id: Some(user_id),
            email: Some(email),
            role,
            company_id,
            is_api_key: false,
        }
    }

    pub fn new_api_key() -> Self {
        // API keys have full access by default in this design
        Self {
            user_id: None,
            email: None,
            role: Role::Admin,
            company_id: None,
            is_api_key: true,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.role.has_permission(permission)
    }

    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(ApiError::authorization(format!("Requires {} role", role)))
        }
    }

    pub fn require_permission(&self, permission: &Permission) -> Result<(), ApiError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(ApiError::authorization(format!(
                "Missing permission: {:?}",
                permission
            )))
        }
    }

    /// The signed-in profile id. API-key requests carry none and are
    /// rejected for endpoints acting on behalf of a person.
    pub fn require_user_id(&self) -> Result<Uuid, ApiError> {
        self.user_id
            .ok_or_else(|| ApiError::authorization("A signed-in user session is required"))
    }

    pub fn require_company_id(&self) -> Result<Uuid, ApiError> {
        self.company_id
            .ok_or_else(|| ApiError::authorization("A company account is required"))
    }
}
