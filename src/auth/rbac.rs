use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Company,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "company" => Some(Role::Company),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Permission {
    // Catalog
    BrowseCatalog,

    // Offer and slot management
    ManageOffers,
    ManageSlots,

    // Bookings
    BookInterviews,
    ViewAllBookings,
    ExportBookings,

    // Administration
    ManageEvents,
    ManageUsers,
    VerifyCompanies,
}

impl Role {
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Role::Student => vec![
                Permission::BrowseCatalog,
                Permission::BookInterviews,
                Permission::ExportBookings,
            ],
            Role::Company => vec![
                Permission::BrowseCatalog,
                Permission::ManageOffers,
                Permission::ManageSlots,
                Permission::ExportBookings,
            ],
            Role::Admin => vec![
                Permission::BrowseCatalog,
                Permission::ManageOffers,
                Permission::ManageSlots,
                Permission::BookInterviews,
                Permission::ViewAllBookings,
                Permission::ExportBookings,
                Permission::ManageEvents,
                Permission::ManageUsers,
                Permission::VerifyCompanies,
            ],
        }
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions().contains(permission)
    }
}
