use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredRestaurant;
use crate::services::cache::CacheStats;

/// Response for the nearby restaurants endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyRestaurantsResponse {
    pub restaurants: Vec<ScoredRestaurant>,
    #[serde(rename = "filterLabels")]
    pub filter_labels: Vec<String>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Place photo lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    #[serde(rename = "imageUri")]
    pub image_uri: String,
    /// `places` when the lookup found a photo, `curated` for the fallback pool
    pub source: String,
}
