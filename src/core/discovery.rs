use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::{
    enrich::enrich_all,
    parser::parse_response,
    prompt::{build_prompt, SYSTEM_INSTRUCTION},
    scoring::score_restaurant,
};
use crate::models::{ChildProfile, GenerateOptions, ScoredRestaurant};
use crate::services::cache::{CacheKey, CacheStats, DiscoveryCache};
use crate::services::gemini::DEFAULT_MODEL;
use crate::services::generator::{GenerationError, TextGenerator};

/// Results stay fresh for 15 minutes
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The generation service could not be reached or refused the call
    #[error("{0}")]
    Upstream(#[from] GenerationError),

    #[error("Discovery request was cancelled")]
    Cancelled,
}

/// Parameters of a discovery request
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub city_or_region: Option<String>,
    pub cuisines: Vec<String>,
    pub profile: Option<ChildProfile>,
}

impl DiscoveryRequest {
    pub fn cache_key(&self) -> String {
        CacheKey::discovery(
            self.latitude,
            self.longitude,
            &self.cuisines,
            self.profile.as_ref().map(|p| p.id.as_str()),
        )
    }
}

/// Model configuration used for discovery prompts
pub fn discovery_options(model: &str, max_output_tokens: u32, temperature: f32) -> GenerateOptions {
    GenerateOptions {
        model: model.to_string(),
        max_output_tokens,
        temperature,
        system_instruction: Some(SYSTEM_INSTRUCTION.to_string()),
    }
}

impl Default for DiscoveryRequest {
    fn default() -> Self {
        Self {
            latitude: crate::services::location::DEFAULT_LATITUDE,
            longitude: crate::services::location::DEFAULT_LONGITUDE,
            city_or_region: None,
            cuisines: Vec::new(),
            profile: None,
        }
    }
}

/// Restaurant discovery orchestrator
///
/// # Pipeline Stages
/// 1. Cache lookup by rounded location, cuisines and profile
/// 2. Prompt building and the generation call
/// 3. Tolerant parsing of the model output
/// 4. Positional enrichment
/// 5. Profile scoring and stable ranking
pub struct Discovery<G> {
    generator: G,
    cache: DiscoveryCache,
    options: GenerateOptions,
}

impl<G: TextGenerator> Discovery<G> {
    pub fn new(generator: G, cache: DiscoveryCache, options: GenerateOptions) -> Self {
        Self {
            generator,
            cache,
            options,
        }
    }

    /// Gemini 2.5 Flash, 2048 output tokens, temperature 0.3, single-slot cache
    pub fn with_defaults(generator: G) -> Self {
        Self::new(
            generator,
            DiscoveryCache::single_slot(DEFAULT_CACHE_TTL),
            discovery_options(DEFAULT_MODEL, 2048, 0.3),
        )
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Fetch, rank and cache restaurants near the requested location
    ///
    /// A fresh cached result for the same key is returned without calling
    /// the generator. Generator failures propagate and are not retried;
    /// unusable model output yields an empty list.
    pub async fn fetch_nearby_restaurants(
        &self,
        request: &DiscoveryRequest,
    ) -> Result<Arc<Vec<ScoredRestaurant>>, DiscoveryError> {
        let key = request.cache_key();
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!("Serving {} cached restaurants for {}", cached.len(), key);
            return Ok(cached);
        }

        let prompt = build_prompt(
            request.latitude,
            request.longitude,
            request.city_or_region.as_deref(),
            &request.cuisines,
        );

        let generation = self
            .generator
            .generate(&prompt, &self.options)
            .await
            .map_err(|e| {
                tracing::error!("Restaurant generation failed: {}", e);
                DiscoveryError::Upstream(e)
            })?;

        let restaurants = rank_restaurants(&generation.text, request.profile.as_ref());
        if restaurants.is_empty() {
            tracing::warn!("Generator returned no usable restaurants for {}", key);
        }

        let restaurants = Arc::new(restaurants);
        self.cache.insert(key, Arc::clone(&restaurants)).await;

        tracing::info!("Discovered {} restaurants", restaurants.len());
        Ok(restaurants)
    }

    /// Like [`Self::fetch_nearby_restaurants`], abandoned once `cancelled` resolves
    ///
    /// A cancelled request never writes to the cache.
    pub async fn fetch_nearby_restaurants_until<F>(
        &self,
        request: &DiscoveryRequest,
        cancelled: F,
    ) -> Result<Arc<Vec<ScoredRestaurant>>, DiscoveryError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancelled => {
                tracing::debug!("Discovery cancelled by caller");
                Err(DiscoveryError::Cancelled)
            }
            result = self.fetch_nearby_restaurants(request) => result,
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

/// Parse, enrich and score model output, best match first
pub fn rank_restaurants(text: &str, profile: Option<&ChildProfile>) -> Vec<ScoredRestaurant> {
    let mut scored: Vec<ScoredRestaurant> = enrich_all(parse_response(text))
        .into_iter()
        .map(|restaurant| {
            let match_score = score_restaurant(&restaurant, profile);
            ScoredRestaurant {
                restaurant,
                match_score,
            }
        })
        .collect();

    sort_by_score(&mut scored);
    scored
}

/// Descending by score; equal scores keep generator order
pub fn sort_by_score(restaurants: &mut [ScoredRestaurant]) {
    restaurants.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}
