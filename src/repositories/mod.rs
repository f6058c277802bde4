pub mod booking_repo;
pub mod company_repo;
pub mod event_repo;
pub mod offer_repo;
pub mod profile_repo;
pub mod slot_repo;

pub use booking_repo::{BookingRepository, SqlxBookingRepository};
pub use company_repo::{CompanyRepository, SqlxCompanyRepository};
pub use event_repo::{EventRepository, SqlxEventRepository};
pub use offer_repo::{OfferRepository, SqlxOfferRepository};
pub use profile_repo::{ProfileRepository, SqlxProfileRepository};
pub use slot_repo::{SlotRepository, SqlxSlotRepository};

/// Postgres unique violations (SQLSTATE 23505) are surfaced as domain
/// outcomes, not 500s.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
