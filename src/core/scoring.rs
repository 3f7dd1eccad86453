use crate::models::{ChildProfile, CrowdLevel, EnrichedRestaurant, Lighting, NoiseLevel};

/// Score for a restaurant when no profile is selected
pub const NEUTRAL_SCORE: i32 = 50;

/// Calculate a match score (0-100) for a restaurant against a child profile
///
/// Scoring rules (additive, clamped once at the end):
/// - noise sensitivity Med/High: low +15, moderate +5, high -10
/// - lighting sensitivity Med/High: soft +12, moderate +4, bright -8
/// - a trigger mentioning "crowd": low +10, moderate +3, busy -8
/// - spacious/wide/space seating preference and a "spacious" tag: +8
pub fn score_restaurant(restaurant: &EnrichedRestaurant, profile: Option<&ChildProfile>) -> u8 {
    let Some(profile) = profile else {
        return NEUTRAL_SCORE as u8;
    };

    let total = NEUTRAL_SCORE
        + noise_adjustment(restaurant, profile)
        + lighting_adjustment(restaurant, profile)
        + crowd_adjustment(restaurant, profile)
        + seating_adjustment(restaurant, profile);

    total.clamp(0, 100) as u8
}

#[inline]
fn noise_adjustment(restaurant: &EnrichedRestaurant, profile: &ChildProfile) -> i32 {
    if !profile.noise_level().is_some_and(|l| l.is_sensitive()) {
        return 0;
    }
    match restaurant.background_noise {
        NoiseLevel::Low => 15,
        NoiseLevel::Moderate => 5,
        NoiseLevel::High => -10,
    }
}

#[inline]
fn lighting_adjustment(restaurant: &EnrichedRestaurant, profile: &ChildProfile) -> i32 {
    if !profile.lighting_level().is_some_and(|l| l.is_sensitive()) {
        return 0;
    }
    match restaurant.lighting {
        Lighting::Soft => 12,
        Lighting::Moderate => 4,
        Lighting::Bright => -8,
    }
}

#[inline]
fn crowd_adjustment(restaurant: &EnrichedRestaurant, profile: &ChildProfile) -> i32 {
    if !has_crowd_trigger(profile) {
        return 0;
    }
    match restaurant.current_crowd {
        CrowdLevel::Low => 10,
        CrowdLevel::Moderate => 3,
        CrowdLevel::Busy => -8,
    }
}

#[inline]
fn seating_adjustment(restaurant: &EnrichedRestaurant, profile: &ChildProfile) -> i32 {
    if wants_spacious_seating(profile)
        && restaurant.best_match_tag.to_lowercase().contains("spacious")
    {
        8
    } else {
        0
    }
}

fn has_crowd_trigger(profile: &ChildProfile) -> bool {
    profile
        .trigger_names()
        .iter()
        .any(|t| t.to_lowercase().contains("crowd"))
}

fn wants_spacious_seating(profile: &ChildProfile) -> bool {
    profile.seating().iter().any(|s| {
        let s = s.to_lowercase();
        s.contains("spacious") || s.contains("wide") || s.contains("space")
    })
}

/// Filter chips describing which profile preferences shape the ranking
pub fn active_filter_labels(profile: Option<&ChildProfile>) -> Vec<String> {
    let Some(profile) = profile else {
        return Vec::new();
    };

    let mut labels = Vec::new();
    if profile.noise_level().is_some_and(|l| l.is_sensitive()) {
        labels.push("Quiet".to_string());
    }
    if profile.lighting_level().is_some_and(|l| l.is_sensitive()) {
        labels.push("Low lighting".to_string());
    }
    if wants_spacious_seating(profile) {
        labels.push("Spacious seating".to_string());
    }
    labels.push("Cultural comfort".to_string());
    labels
}
