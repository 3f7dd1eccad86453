use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, ProfileRequest};
use crate::routes::AppState;
use crate::services::{ProfileDraft, ProfileStoreError, TextGenerator};

/// Configure all profile routes
pub fn configure<G: TextGenerator + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::post().to(create_profile::<G>))
        .route("/profiles", web::get().to(list_profiles::<G>))
        .route("/profiles/{id}", web::get().to(get_profile::<G>))
        .route("/profiles/{id}", web::put().to(update_profile::<G>));
}

impl From<ProfileRequest> for ProfileDraft {
    fn from(req: ProfileRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            sensory: req.sensory,
            routine: req.routine,
            food: req.food,
            communication: req.communication,
        }
    }
}

fn store_error_response(e: ProfileStoreError) -> HttpResponse {
    match e {
        ProfileStoreError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Profile not found".to_string(),
            message: e.to_string(),
            status_code: 404,
        }),
        ProfileStoreError::InvalidInput(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// POST /api/v1/profiles
async fn create_profile<G: TextGenerator + 'static>(
    state: web::Data<AppState<G>>,
    req: web::Json<ProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    match state.profiles.add(req.into_inner().into()).await {
        Ok(profile) => {
            tracing::info!("Created profile {}", profile.id);
            HttpResponse::Created().json(profile)
        }
        Err(e) => store_error_response(e),
    }
}

/// GET /api/v1/profiles
async fn list_profiles<G: TextGenerator + 'static>(state: web::Data<AppState<G>>) -> impl Responder {
    HttpResponse::Ok().json(state.profiles.list().await)
}

/// GET /api/v1/profiles/{id}
async fn get_profile<G: TextGenerator + 'static>(
    state: web::Data<AppState<G>>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match state.profiles.get(&id).await {
        Some(profile) => HttpResponse::Ok().json(profile),
        None => store_error_response(ProfileStoreError::NotFound(id)),
    }
}

/// PUT /api/v1/profiles/{id}
async fn update_profile<G: TextGenerator + 'static>(
    state: web::Data<AppState<G>>,
    path: web::Path<String>,
    req: web::Json<ProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    match state.profiles.update(path.as_str(), req.into_inner().into()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => store_error_response(e),
    }
}
