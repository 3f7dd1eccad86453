//! Calm Table - sensory-aware restaurant discovery
//!
//! This library ranks nearby restaurants for a child's sensory profile.
//! Candidates come from a text-generation service, are parsed leniently,
//! enriched deterministically, scored against the profile and memoized.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{build_prompt, enrich, image_for, parse_response, score_restaurant, Discovery, DiscoveryError, DiscoveryRequest};
pub use models::{ChildProfile, EnrichedRestaurant, RestaurantCandidate, ScoredRestaurant, SensitivityLevel};
pub use services::{DiscoveryCache, GeminiClient, TextGenerator};
