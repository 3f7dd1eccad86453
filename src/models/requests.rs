use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CommunicationProfile, FoodProfile, RoutineProfile, SensoryProfile};

/// Request to discover restaurants near a location
///
/// Without coordinates the configured fallback location is used.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyRestaurantsRequest {
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[serde(alias = "city_or_region", rename = "cityOrRegion", default)]
    pub city_or_region: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(alias = "profile_id", rename = "profileId", default)]
    pub profile_id: Option<String>,
}

/// Request to create or update a child profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub sensory: Option<SensoryProfile>,
    #[serde(default)]
    pub routine: Option<RoutineProfile>,
    #[serde(default)]
    pub food: Option<FoodProfile>,
    #[serde(default)]
    pub communication: Option<CommunicationProfile>,
}

/// Query for a place photo lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhotoQuery {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}
