// Service exports
pub mod cache;
pub mod gemini;
pub mod generator;
pub mod location;
pub mod places;
pub mod profiles;

pub use cache::{CacheEntry, CacheKey, CacheMode, CacheStats, DiscoveryCache};
pub use gemini::{ApiCheck, GeminiClient};
pub use generator::{GenerationError, TextGenerator};
pub use location::{default_location, resolve_location, LocationError, LocationProvider, ReportedLocation};
pub use places::{PhotoLookup, PlacesClient, PlacesError};
pub use profiles::{ProfileDraft, ProfileStore, ProfileStoreError};
