pub mod admin_handlers;
pub mod auth_handlers;
pub mod booking_handlers;
pub mod company_handlers;
pub mod event_handlers;
pub mod export_handlers;
pub mod health_handlers;
pub mod metrics_handlers;
pub mod offer_handlers;
pub mod profile_handlers;
pub mod slot_handlers;

pub use health_handlers::{health_check, health_check_simple, liveness_check, readiness_check};
