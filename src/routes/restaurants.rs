use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{active_filter_labels, image_for, DiscoveryError, DiscoveryRequest};
use crate::models::{ErrorResponse, NearbyRestaurantsRequest, NearbyRestaurantsResponse, PhotoQuery, PhotoResponse};
use crate::routes::AppState;
use crate::services::{resolve_location, PhotoLookup, ReportedLocation, TextGenerator};

/// Configure all restaurant-related routes
pub fn configure<G: TextGenerator + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/restaurants/nearby", web::post().to(nearby_restaurants::<G>))
        .route("/restaurants/photo", web::get().to(restaurant_photo::<G>))
        .route("/restaurants/cache/clear", web::post().to(clear_cache::<G>));
}

/// Nearby restaurants endpoint
///
/// POST /api/v1/restaurants/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 37.7749,
///   "longitude": -122.4194,
///   "cityOrRegion": "San Francisco, CA",
///   "cuisines": ["Italian", "Mexican"],
///   "profileId": "string"
/// }
/// ```
///
/// Without `latitude`/`longitude` the configured fallback location is used.
/// Requests running longer than the configured timeout get a 503.
async fn nearby_restaurants<G: TextGenerator + 'static>(
    state: web::Data<AppState<G>>,
    req: web::Json<NearbyRestaurantsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby_restaurants request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();

    let profile = match req.profile_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => match state.profiles.get(id).await {
            Some(profile) => Some(profile),
            None => {
                return HttpResponse::NotFound().json(ErrorResponse {
                    error: "Profile not found".to_string(),
                    message: format!("No profile with id {}", id),
                    status_code: 404,
                });
            }
        },
        None => None,
    };

    let reported = ReportedLocation::new(req.latitude, req.longitude, req.city_or_region);
    let location = resolve_location(&reported, &state.fallback_location).await;

    tracing::info!(
        "Finding restaurants near {:.2}, {:.2} (cuisines: {}, profile: {})",
        location.latitude,
        location.longitude,
        req.cuisines.len(),
        profile.as_ref().map(|p| p.id.as_str()).unwrap_or("none")
    );

    let filter_labels = active_filter_labels(profile.as_ref());
    let request = DiscoveryRequest {
        latitude: location.latitude,
        longitude: location.longitude,
        city_or_region: location.city_or_region,
        cuisines: req.cuisines,
        profile,
    };

    let deadline = tokio::time::sleep(state.request_timeout);
    match state
        .discovery
        .fetch_nearby_restaurants_until(&request, deadline)
        .await
    {
        Ok(restaurants) => HttpResponse::Ok().json(NearbyRestaurantsResponse {
            total_results: restaurants.len(),
            restaurants: restaurants.to_vec(),
            filter_labels,
        }),
        Err(DiscoveryError::Upstream(e)) => HttpResponse::BadGateway().json(ErrorResponse {
            error: "Could not load restaurants".to_string(),
            message: e.to_string(),
            status_code: 502,
        }),
        Err(e @ DiscoveryError::Cancelled) => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Request timed out".to_string(),
            message: e.to_string(),
            status_code: 503,
        }),
    }
}

/// Restaurant photo endpoint
///
/// GET /api/v1/restaurants/photo?name=...&latitude=...&longitude=...
///
/// Falls back to the curated image for the name when Places has no photo.
async fn restaurant_photo<G: TextGenerator + 'static>(
    state: web::Data<AppState<G>>,
    query: web::Query<PhotoQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let response = match state
        .places
        .get_place_photo(&query.name, query.latitude, query.longitude)
        .await
    {
        Some(url) => PhotoResponse {
            image_uri: url,
            source: "places".to_string(),
        },
        None => PhotoResponse {
            image_uri: image_for(&query.name).to_string(),
            source: "curated".to_string(),
        },
    };

    HttpResponse::Ok().json(response)
}

/// Drop cached discovery results
///
/// POST /api/v1/restaurants/cache/clear
async fn clear_cache<G: TextGenerator + 'static>(state: web::Data<AppState<G>>) -> impl Responder {
    state.discovery.clear_cache().await;
    tracing::info!("Discovery cache cleared via API");
    HttpResponse::NoContent().finish()
}
