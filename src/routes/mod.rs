// Route exports
pub mod profiles;
pub mod restaurants;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Duration;

use crate::core::Discovery;
use crate::models::{HealthResponse, Location};
use crate::services::{default_location, PlacesClient, ProfileStore, TextGenerator};

/// Discovery requests still running after this are abandoned
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Application state shared across all handlers
pub struct AppState<G> {
    pub discovery: Arc<Discovery<G>>,
    pub profiles: Arc<ProfileStore>,
    pub places: Arc<PlacesClient>,
    /// Used when a request carries no usable coordinates
    pub fallback_location: Location,
    pub request_timeout: Duration,
}

impl<G> AppState<G> {
    pub fn new(discovery: Discovery<G>, profiles: ProfileStore, places: PlacesClient) -> Self {
        Self {
            discovery: Arc::new(discovery),
            profiles: Arc::new(profiles),
            places: Arc::new(places),
            fallback_location: default_location(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_fallback_location(mut self, location: Location) -> Self {
        self.fallback_location = location;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            discovery: Arc::clone(&self.discovery),
            profiles: Arc::clone(&self.profiles),
            places: Arc::clone(&self.places),
            fallback_location: self.fallback_location.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

pub fn configure_routes<G: TextGenerator + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check::<G>))
            .configure(restaurants::configure::<G>)
            .configure(profiles::configure::<G>),
    );
}

/// Health check endpoint
async fn health_check<G: TextGenerator + 'static>(
    state: web::Data<AppState<G>>,
) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.discovery.cache_stats().await,
    })
}
