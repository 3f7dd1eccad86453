use crate::models::{CrowdLevel, EnrichedRestaurant, Lighting, NoiseLevel, RestaurantCandidate};

const CULTURAL_COMFORT_POOL: &[&[&str]] = &[
    &["American", "Italian"],
    &["American", "Mexican"],
    &["Mediterranean", "American"],
    &["Asian", "American"],
    &["Italian"],
    &["American"],
    &["Mexican", "American"],
    &["Japanese", "American"],
];

const CROWD_POOL: &[CrowdLevel] = &[CrowdLevel::Low, CrowdLevel::Moderate, CrowdLevel::Busy];

const LIGHTING_POOL: &[Lighting] = &[Lighting::Soft, Lighting::Moderate, Lighting::Bright];

const NOISE_POOL: &[NoiseLevel] = &[NoiseLevel::Low, NoiseLevel::Moderate, NoiseLevel::High];

const MENU_SUMMARY_POOL: &[&str] = &[
    "Simple comfort dishes, kids menu, familiar options.",
    "Varied menu with gluten-free options and plain preparations available.",
    "Limited but clear menu; staff used to modifications.",
    "Family-style portions; can request quieter seating.",
];

const ALLERGEN_POOL: &[&[&str]] = &[
    &["Nuts", "Dairy"],
    &["Gluten"],
    &["Nuts"],
    &["Dairy", "Eggs"],
    &["None listed"],
    &["Shellfish", "Nuts"],
];

const WAIT_TIME_POOL: &[&str] = &["5–15 min", "10–20 min", "15–25 min", "5–10 min", "20–35 min"];

const BEST_MATCH_TAG_POOL: &[&str] = &[
    "Best match for quiet dining",
    "Calm atmosphere, spacious seating",
    "Low stimulation, predictable",
    "Quiet and low lighting",
    "Spacious seating, minimal crowding",
];

/// Curated restaurant photos (Unsplash, no API key required)
pub const RESTAURANT_IMAGE_URLS: &[&str] = &[
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1555396273-367ea4eb4db5?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1552566626-52f8b828add9?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1514933651103-005eec06c04b?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1550966871-3ed3cdb5ed0c?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1559339352-11d035aa65de?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1424847651672-bf20ade79823?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1466978913421-dad2ebd01d17?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1544148103-0773bf10d330?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1590846406792-0adc7f938f1d?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1578474846511-04ba529f0b88?w=400&h=400&fit=crop",
];

#[inline]
fn pick<T>(pool: &[T], index: usize) -> &T {
    &pool[index % pool.len()]
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 32-bit signed polynomial rolling hash (`h * 31 + c`) over UTF-16 code units
pub fn name_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Stable photo for a restaurant name, independent of list position
pub fn image_for(name: &str) -> &'static str {
    // only an empty name falls back; whitespace trims down to ""
    let key = if name.is_empty() { "restaurant" } else { name.trim() };
    let index = name_hash(key).unsigned_abs() as usize % RESTAURANT_IMAGE_URLS.len();
    RESTAURANT_IMAGE_URLS[index]
}

/// Attach synthetic sensory/comfort attributes to a candidate
///
/// Every attribute is `pool[index % pool.len()]`, so the same candidate at
/// the same position always yields the same record.
pub fn enrich(candidate: RestaurantCandidate, index: usize) -> EnrichedRestaurant {
    let image_uri = image_for(&candidate.name).to_string();

    EnrichedRestaurant {
        cultural_comfort: owned(*pick(CULTURAL_COMFORT_POOL, index)),
        current_crowd: *pick(CROWD_POOL, index),
        lighting: *pick(LIGHTING_POOL, index),
        menu_summary: pick(MENU_SUMMARY_POOL, index).to_string(),
        allergens: owned(*pick(ALLERGEN_POOL, index)),
        usual_wait_time: pick(WAIT_TIME_POOL, index).to_string(),
        background_noise: *pick(NOISE_POOL, index),
        best_match_tag: pick(BEST_MATCH_TAG_POOL, index).to_string(),
        image_uri,
        candidate,
    }
}

/// Enrich a parsed list using each candidate's position
pub fn enrich_all(candidates: Vec<RestaurantCandidate>) -> Vec<EnrichedRestaurant> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| enrich(candidate, index))
        .collect()
}
