use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{delete, get, patch, post},
    Router,
};
use axum_extra::extract::cookie::Key;

use crate::{
    config::Settings,
    database::DatabasePool,
    repositories::{
        BookingRepository, CompanyRepository, EventRepository, OfferRepository,
        ProfileRepository, SlotRepository, SqlxBookingRepository, SqlxCompanyRepository,
        SqlxEventRepository, SqlxOfferRepository, SqlxProfileRepository, SqlxSlotRepository,
    },
    services::{AuthService, BookingService, ExportService, MetricsService, SlotService},
};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db_pool: DatabasePool,
    pub profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    pub company_repository: Arc<dyn CompanyRepository + Send + Sync>,
    pub event_repository: Arc<dyn EventRepository + Send + Sync>,
    pub offer_repository: Arc<dyn OfferRepository + Send + Sync>,
    pub slot_repository: Arc<dyn SlotRepository + Send + Sync>,
    pub booking_repository: Arc<dyn BookingRepository + Send + Sync>,
    pub auth_service: Arc<AuthService>,
    pub slot_service: Arc<SlotService>,
    pub booking_service: Arc<BookingService>,
    pub export_service: Arc<ExportService>,
    pub metrics_service: Arc<MetricsService>,
    pub key: Key,
}

// Lets the private cookie jar extract its key from the state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

impl AppState {
    /// Connect to the database (with retry), run migrations and wire up
    /// repositories and services.
    pub async fn new(config: Settings) -> Result<Self, crate::error::ApiError> {
        let db_pool = crate::database::create_connection_pool(&config).await?;
        Ok(Self::new_with_pool(config, db_pool))
    }

    /// Wire up application state over an existing database pool.
    pub fn new_with_pool(config: Settings, db_pool: DatabasePool) -> Self {
        let profile_repository: Arc<dyn ProfileRepository + Send + Sync> =
            Arc::new(SqlxProfileRepository::new(db_pool.clone()));
        let company_repository: Arc<dyn CompanyRepository + Send + Sync> =
            Arc::new(SqlxCompanyRepository::new(db_pool.clone()));
        let event_repository: Arc<dyn EventRepository + Send + Sync> =
            Arc::new(SqlxEventRepository::new(db_pool.clone()));
        let offer_repository: Arc<dyn OfferRepository + Send + Sync> =
            Arc::new(SqlxOfferRepository::new(db_pool.clone()));
        let slot_repository: Arc<dyn SlotRepository + Send + Sync> =
            Arc::new(SqlxSlotRepository::new(db_pool.clone()));
        let booking_repository: Arc<dyn BookingRepository + Send + Sync> =
            Arc::new(SqlxBookingRepository::new(db_pool.clone()));

        Self::with_repositories(
            config,
            db_pool,
            profile_repository,
            company_repository,
            event_repository,
            offer_repository,
            slot_repository,
            booking_repository,
        )
    }

    /// Wire up application state over explicit repositories. Tests inject
    /// mock repositories here.
    #[allow(clippy::too_many_arguments)]
    pub fn with_repositories(
        config: Settings,
        db_pool: DatabasePool,
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
        company_repository: Arc<dyn CompanyRepository + Send + Sync>,
        event_repository: Arc<dyn EventRepository + Send + Sync>,
        offer_repository: Arc<dyn OfferRepository + Send + Sync>,
        slot_repository: Arc<dyn SlotRepository + Send + Sync>,
        booking_repository: Arc<dyn BookingRepository + Send + Sync>,
    ) -> Self {
        let config = Arc::new(config);
        let key = Key::from(config.auth_secret.as_bytes());

        let auth_service = Arc::new(AuthService::new(
            config.clone(),
            profile_repository.clone(),
            company_repository.clone(),
        ));

        let slot_service = Arc::new(SlotService::new(
            config.clone(),
            slot_repository.clone(),
            event_repository.clone(),
            company_repository.clone(),
        ));

        let booking_service = Arc::new(BookingService::new(
            booking_repository.clone(),
            slot_repository.clone(),
            event_repository.clone(),
            profile_repository.clone(),
        ));

        let export_service = Arc::new(ExportService::new(
            config.clone(),
            booking_repository.clone(),
        ));

        let metrics_service = Arc::new(MetricsService::new());

        Self {
            config,
            db_pool,
            profile_repository,
            company_repository,
            event_repository,
            offer_repository,
            slot_repository,
            booking_repository,
            auth_service,
            slot_service,
            booking_service,
            export_service,
            metrics_service,
            key,
        }
    }
}

/// Build the full application router over the given state. Used by both
/// the binary and the integration tests.
pub fn app_router(app_state: AppState) -> Router {
    let cors_layer = middleware::create_cors_layer(app_state.config.cors_allow_origins.clone());

    // Public routes (health + auth entry points)
    let public_routes = Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/health/simple", get(handlers::health_check_simple))
        .route("/api/health/ready", get(handlers::readiness_check))
        .route("/api/health/live", get(handlers::liveness_check))
        .route("/api/auth/register", post(handlers::auth_handlers::register))
        .route("/api/auth/login", post(handlers::auth_handlers::login))
        .route("/api/auth/logout", post(handlers::auth_handlers::logout));

    // Protected routes (require API key or session)
    let protected_routes = Router::new()
        // Session / profile
        .route("/api/auth/me", get(handlers::auth_handlers::get_me))
        .route("/api/profile", get(handlers::profile_handlers::get_profile))
        .route("/api/profile", patch(handlers::profile_handlers::update_profile))
        // Companies
        .route("/api/companies", get(handlers::company_handlers::list_companies))
        .route("/api/companies/me", get(handlers::company_handlers::get_my_company))
        .route("/api/companies/me", patch(handlers::company_handlers::update_my_company))
        .route("/api/companies/me/bookings", get(handlers::booking_handlers::company_bookings))
        .route("/api/companies/:id", get(handlers::company_handlers::get_company))
        // Offer catalog
        .route("/api/offers", get(handlers::offer_handlers::list_offers))
        .route("/api/offers", post(handlers::offer_handlers::create_offer))
        .route("/api/offers/mine", get(handlers::offer_handlers::my_offers))
        .route("/api/offers/:id", get(handlers::offer_handlers::get_offer))
        .route("/api/offers/:id", patch(handlers::offer_handlers::update_offer))
        .route("/api/offers/:id", delete(handlers::offer_handlers::delete_offer))
        // Events
        .route("/api/events", get(handlers::event_handlers::list_events))
        .route("/api/events/:id", get(handlers::event_handlers::get_event))
        .route("/api/events/:id/booking-limit", get(handlers::event_handlers::get_booking_limit))
        // Slots
        .route("/api/slots", get(handlers::slot_handlers::list_slots))
        .route("/api/slots", post(handlers::slot_handlers::create_slot))
        .route("/api/slots/mine", get(handlers::slot_handlers::my_slots))
        .route("/api/slots/:id", patch(handlers::slot_handlers::update_slot))
        .route("/api/slots/:id", delete(handlers::slot_handlers::delete_slot))
        .route("/api/slots/:id/conflict", get(handlers::slot_handlers::check_conflict))
        // Bookings
        .route("/api/bookings", post(handlers::booking_handlers::create_booking))
        .route("/api/bookings/mine", get(handlers::booking_handlers::my_bookings))
        .route("/api/bookings/:id/cancel", post(handlers::booking_handlers::cancel_booking))
        // Exports
        .route("/api/export/bookings.csv", get(handlers::export_handlers::export_bookings_csv))
        .route("/api/export/bookings.pdf", get(handlers::export_handlers::export_bookings_pdf))
        // Admin
        .route("/api/admin/users", get(handlers::admin_handlers::list_users))
        .route("/api/admin/users/:id", patch(handlers::admin_handlers::update_user_flags))
        .route("/api/admin/companies", get(handlers::admin_handlers::list_companies))
        .route("/api/admin/companies/:id/verify", post(handlers::admin_handlers::verify_company))
        .route("/api/admin/events", get(handlers::event_handlers::list_all_events))
        .route("/api/admin/events", post(handlers::event_handlers::create_event))
        .route("/api/admin/events/:id", patch(handlers::event_handlers::update_event))
        .route("/api/admin/events/:id", delete(handlers::event_handlers::delete_event))
        .route("/api/admin/bookings", get(handlers::booking_handlers::admin_bookings))
        // Metrics
        .route("/api/metrics", get(handlers::metrics_handlers::get_metrics))
        .route("/api/metrics/report", get(handlers::metrics_handlers::get_performance_report))
        .route("/api/metrics/health", get(handlers::metrics_handlers::get_health_metrics))
        // Add auth middleware
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::auth_middleware,
        ));

    let rate_limit_enabled = app_state.config.rate_limit_enabled;
    let rate_limiter = Arc::new(middleware::create_rate_limiter(&app_state.config));
    let metrics_service = app_state.metrics_service.clone();

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
        // Apply middleware layers (global)
        .layer(axum::middleware::from_fn_with_state(
            metrics_service,
            middleware::metrics_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .layer(middleware::create_logging_layer())
        .layer(cors_layer);

    if rate_limit_enabled {
        app.layer(axum::middleware::from_fn_with_state(
            rate_limiter,
            middleware::rate_limit_middleware,
        ))
    } else {
        app
    }
}
