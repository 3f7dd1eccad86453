// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ChildProfile, CommunicationProfile, CrowdLevel, EnrichedRestaurant, FoodProfile, GenerateOptions,
    Generation, Lighting, Location, NoiseLevel, RestaurantCandidate, RoutineProfile, ScoredRestaurant,
    SensitivityLevel, SensoryProfile,
};
pub use requests::{NearbyRestaurantsRequest, PhotoQuery, ProfileRequest};
pub use responses::{ErrorResponse, HealthResponse, NearbyRestaurantsResponse, PhotoResponse};
