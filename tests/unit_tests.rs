// Unit tests for the Calm Table discovery pipeline

use calm_table::core::{
    discovery::{rank_restaurants, sort_by_score},
    enrich::{enrich, enrich_all, image_for},
    parser::parse_response,
    prompt::{build_prompt, CUISINE_VARIETY_PHRASE},
    scoring::{active_filter_labels, score_restaurant},
};
use calm_table::models::{
    ChildProfile, CrowdLevel, Lighting, NoiseLevel, RestaurantCandidate, RoutineProfile,
    ScoredRestaurant, SensitivityLevel, SensoryProfile,
};

fn create_candidate(name: &str) -> RestaurantCandidate {
    RestaurantCandidate {
        name: name.to_string(),
        cuisine: "Italian".to_string(),
        rating: 4.4,
        price_level: 2,
        address: Some("1 Market St, San Francisco, CA".to_string()),
    }
}

fn create_profile(id: &str, noise: u8, lighting: u8, triggers: &[&str], seating: &[&str]) -> ChildProfile {
    ChildProfile {
        id: id.to_string(),
        name: "Test Child".to_string(),
        age: "8".to_string(),
        sensory: Some(SensoryProfile {
            noise_level: SensitivityLevel::try_from(noise).ok(),
            lighting_level: SensitivityLevel::try_from(lighting).ok(),
            trigger_names: triggers.iter().map(|t| t.to_string()).collect(),
        }),
        routine: Some(RoutineProfile {
            routine_level: Some(SensitivityLevel::Med),
            wait_time: Some("5-15 minutes".to_string()),
            seating: seating.iter().map(|s| s.to_string()).collect(),
        }),
        food: None,
        communication: None,
    }
}

#[test]
fn test_prompt_end_to_end_scenario() {
    let cuisines = vec!["Italian".to_string(), "Mexican".to_string()];
    let prompt = build_prompt(37.7749, -122.4194, None, &cuisines);

    assert!(prompt.contains("near coordinates 37.7749, -122.4194"));
    assert!(prompt.contains("Italian, Mexican"));
    assert!(!prompt.contains(CUISINE_VARIETY_PHRASE));
}

#[test]
fn test_prompt_rounds_coordinates_to_four_places() {
    let prompt = build_prompt(40.712776, -74.005974, None, &[]);
    assert!(prompt.contains("near coordinates 40.7128, -74.0060"));
}

#[test]
fn test_parse_never_panics_on_garbage() {
    let inputs = [
        "",
        "not json",
        "{\"name\":\"object root\"}",
        "[\"a\", null, 1, true, {\"name\":\"ok\"}]",
        "```json\n{oops\n```",
        "[[[[",
        "```",
        "\u{0}\u{1}",
        "[{\"rating\":1e400}]",
    ];

    for input in inputs {
        let parsed = parse_response(input);
        for candidate in &parsed {
            assert!(candidate.rating.is_finite());
            assert!((0.0..=5.0).contains(&candidate.rating));
            assert!((1..=3).contains(&candidate.price_level));
        }
    }
}

#[test]
fn test_parse_clamps_scenario() {
    let parsed = parse_response(r#"[{"name":"A","cuisine":"Italian","rating":7,"priceLevel":9}]"#);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].rating, 5.0);
    assert_eq!(parsed[0].price_level, 3);
}

#[test]
fn test_parse_not_json_is_empty() {
    assert!(parse_response("not json").is_empty());
}

#[test]
fn test_enrich_is_repeatable() {
    for index in [0, 1, 2, 7, 11, 120, usize::MAX] {
        let a = serde_json::to_string(&enrich(create_candidate("Stable"), index)).unwrap();
        let b = serde_json::to_string(&enrich(create_candidate("Stable"), index)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_image_depends_only_on_trimmed_name() {
    let first = image_for("Trattoria Calma");
    for _ in 0..10 {
        assert_eq!(image_for("Trattoria Calma"), first);
    }
    assert_eq!(image_for("\tTrattoria Calma\n"), first);
}

#[test]
fn test_score_without_profile_is_neutral() {
    for restaurant in enrich_all((0..12).map(|i| create_candidate(&format!("R{}", i))).collect()) {
        assert_eq!(score_restaurant(&restaurant, None), 50);
    }
}

#[test]
fn test_score_noise_high_low_noise_bright_light() {
    let mut restaurant = enrich(create_candidate("Quiet Spot"), 0);
    restaurant.background_noise = NoiseLevel::Low;
    restaurant.lighting = Lighting::Bright;
    restaurant.current_crowd = CrowdLevel::Busy;
    restaurant.best_match_tag = "Quiet and low lighting".to_string();

    let profile = create_profile("p1", 2, 1, &[], &[]);
    assert_eq!(score_restaurant(&restaurant, Some(&profile)), 57);
}

#[test]
fn test_score_stays_in_range() {
    let profiles = [
        create_profile("a", 2, 2, &["Crowds"], &["Spacious booth"]),
        create_profile("b", 0, 0, &[], &[]),
        create_profile("c", 1, 2, &["crowded places"], &["wide aisle"]),
    ];

    for restaurant in enrich_all((0..60).map(|i| create_candidate(&format!("R{}", i))).collect()) {
        for profile in &profiles {
            let score = score_restaurant(&restaurant, Some(profile));
            assert!(score <= 100);
        }
    }
}

#[test]
fn test_stable_sort_scenario() {
    let mut list: Vec<ScoredRestaurant> = ["first", "second", "third", "fourth"]
        .iter()
        .zip([40u8, 90, 90, 10])
        .enumerate()
        .map(|(i, (name, match_score))| ScoredRestaurant {
            restaurant: enrich(create_candidate(name), i),
            match_score,
        })
        .collect();

    sort_by_score(&mut list);

    let names: Vec<&str> = list.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["second", "third", "first", "fourth"]);
}

#[test]
fn test_rank_full_page_for_sensitive_profile() {
    let text: String = format!(
        "[{}]",
        (0..12)
            .map(|i| format!(r#"{{"name":"Place {}","rating":4.{},"priceLevel":{}}}"#, i, i % 10, i % 3 + 1))
            .collect::<Vec<_>>()
            .join(",")
    );
    let profile = create_profile("p1", 2, 2, &["Crowds"], &["Spacious seating"]);

    let ranked = rank_restaurants(&text, Some(&profile));
    assert_eq!(ranked.len(), 12);

    for pair in ranked.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }

    // positions 6 and 9 are quiet, soft, uncrowded and tagged spacious
    assert_eq!(ranked[0].name(), "Place 6");
    assert_eq!(ranked[1].name(), "Place 9");
    assert_eq!(ranked[0].match_score, 50 + 15 + 12 + 10 + 8);
    assert_eq!(ranked[2].name(), "Place 0");
    assert_eq!(ranked[2].match_score, 50 + 15 + 12 + 10);
}

#[test]
fn test_filter_labels_follow_profile() {
    let profile = create_profile("p1", 1, 2, &[], &["Wide table"]);
    assert_eq!(
        active_filter_labels(Some(&profile)),
        vec!["Quiet", "Low lighting", "Spacious seating", "Cultural comfort"]
    );

    let calm = create_profile("p2", 0, 0, &[], &["Booth"]);
    assert_eq!(active_filter_labels(Some(&calm)), vec!["Cultural comfort"]);
}
