// Core pipeline exports
pub mod discovery;
pub mod enrich;
pub mod parser;
pub mod prompt;
pub mod scoring;

pub use discovery::{rank_restaurants, sort_by_score, Discovery, DiscoveryError, DiscoveryRequest};
pub use enrich::{enrich, enrich_all, image_for};
pub use parser::parse_response;
pub use prompt::build_prompt;
pub use scoring::{active_filter_labels, score_restaurant};
