use serde::{Deserialize, Serialize};

/// Ordinal sensitivity rating collected during onboarding (Low=0, Med=1, High=2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SensitivityLevel {
    Low,
    Med,
    High,
}

impl SensitivityLevel {
    /// Med and High both count as "sensitive" for scoring and filter chips
    pub fn is_sensitive(self) -> bool {
        self >= SensitivityLevel::Med
    }
}

impl TryFrom<u8> for SensitivityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SensitivityLevel::Low),
            1 => Ok(SensitivityLevel::Med),
            2 => Ok(SensitivityLevel::High),
            other => Err(format!("sensitivity level must be 0, 1 or 2, got {}", other)),
        }
    }
}

impl From<SensitivityLevel> for u8 {
    fn from(level: SensitivityLevel) -> Self {
        match level {
            SensitivityLevel::Low => 0,
            SensitivityLevel::Med => 1,
            SensitivityLevel::High => 2,
        }
    }
}

/// Child profile as collected by the onboarding flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: String,
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

impl ChildProfile {
    pub fn noise_level(&self) -> Option<SensitivityLevel> {
        self.sensory.as_ref().and_then(|s| s.noise_level)
    }

    pub fn lighting_level(&self) -> Option<SensitivityLevel> {
        self.sensory.as_ref().and_then(|s| s.lighting_level)
    }

    pub fn trigger_names(&self) -> &[String] {
        self.sensory
            .as_ref()
            .map(|s| s.trigger_names.as_slice())
            .unwrap_or(&[])
    }

    pub fn seating(&self) -> &[String] {
        self.routine
            .as_ref()
            .map(|r| r.seating.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensoryProfile {
    #[serde(rename = "noiseLevel", default)]
    pub noise_level: Option<SensitivityLevel>,
    #[serde(rename = "lightingLevel", default)]
    pub lighting_level: Option<SensitivityLevel>,
    #[serde(rename = "triggerNames", default)]
    pub trigger_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutineProfile {
    #[serde(rename = "routineLevel", default)]
    pub routine_level: Option<SensitivityLevel>,
    #[serde(rename = "waitTime", default)]
    pub wait_time: Option<String>,
    #[serde(default)]
    pub seating: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodProfile {
    #[serde(rename = "safeFoods", default)]
    pub safe_foods: Vec<String>,
    #[serde(default)]
    pub aversions: Vec<String>,
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunicationProfile {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(rename = "primaryLanguage", default)]
    pub primary_language: Option<String>,
    #[serde(rename = "secondaryLanguage", default)]
    pub secondary_language: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Restaurant as returned by the text-generation service, after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantCandidate {
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    /// 1 = $, 2 = $$, 3 = $$$
    #[serde(rename = "priceLevel")]
    pub price_level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdLevel {
    Low,
    Moderate,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    Soft,
    Moderate,
    Bright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseLevel {
    Low,
    Moderate,
    High,
}

/// Candidate plus synthetic sensory/comfort attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRestaurant {
    #[serde(flatten)]
    pub candidate: RestaurantCandidate,
    #[serde(rename = "culturalComfort")]
    pub cultural_comfort: Vec<String>,
    #[serde(rename = "currentCrowd")]
    pub current_crowd: CrowdLevel,
    pub lighting: Lighting,
    #[serde(rename = "menuSummary")]
    pub menu_summary: String,
    pub allergens: Vec<String>,
    #[serde(rename = "usualWaitTime")]
    pub usual_wait_time: String,
    #[serde(rename = "backgroundNoise")]
    pub background_noise: NoiseLevel,
    #[serde(rename = "bestMatchTag")]
    pub best_match_tag: String,
    #[serde(rename = "imageUri")]
    pub image_uri: String,
}

/// Enriched restaurant ranked against a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRestaurant {
    #[serde(flatten)]
    pub restaurant: EnrichedRestaurant,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

impl ScoredRestaurant {
    pub fn name(&self) -> &str {
        &self.restaurant.candidate.name
    }
}

/// Resolved device location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "cityOrRegion", default, skip_serializing_if = "Option::is_none")]
    pub city_or_region: Option<String>,
}

/// Model configuration passed to the text-generation collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub system_instruction: Option<String>,
}

/// Text returned by the text-generation collaborator
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub raw: Option<serde_json::Value>,
}
