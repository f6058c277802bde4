pub mod auth_service;
pub mod booking_service;
pub mod export_service;
pub mod metrics_service;
pub mod slot_service;

// Re-export commonly used types
pub use auth_service::{AuthService, Registration};
pub use booking_service::{BookingService, BookingSubmission};
pub use export_service::ExportService;
pub use metrics_service::MetricsService;
pub use slot_service::SlotService;
