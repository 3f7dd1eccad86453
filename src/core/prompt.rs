/// Number of restaurants requested from the generator per discovery call
pub const RESTAURANT_COUNT: usize = 12;

/// System instruction sent with every discovery prompt
pub const SYSTEM_INSTRUCTION: &str = "You respond only with a valid JSON array. No markdown, no explanation. Only real restaurant names and real places that exist.";

/// Phrase used when no cuisine filter is selected
pub const CUISINE_VARIETY_PHRASE: &str = "Include a variety of cuisines.";

/// Build the discovery prompt for the text-generation service
///
/// A non-blank `city_or_region` is preferred over raw coordinates, which are
/// formatted to 4 decimal places.
pub fn build_prompt(
    latitude: f64,
    longitude: f64,
    city_or_region: Option<&str>,
    cuisines: &[String],
) -> String {
    let location = match city_or_region.map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => format!("in or near {}", city),
        None => format!("near coordinates {:.4}, {:.4}", latitude, longitude),
    };

    let cuisine_clause = if cuisines.is_empty() {
        format!(". {}", CUISINE_VARIETY_PHRASE)
    } else {
        format!(" that serve or specialize in: {}.", cuisines.join(", "))
    };

    format!(
        r#"List {count} real, existing restaurants {location}{cuisine_clause}

Return a JSON array only, no other text. Each object must have:
- "name" (string): restaurant name
- "cuisine" (string): primary cuisine type, e.g. American, Italian, Mediterranean
- "rating" (number): 3.0 to 5.0
- "priceLevel" (number): 1, 2, or 3 (1=$ budget, 2=$$ mid, 3=$$$ upscale)
- "address" (string): full street address of the restaurant in the format "Street, City, State/Region" so a user can find it

Example: [{{"name":"The Quiet Corner Café","cuisine":"American","rating":4.5,"priceLevel":2,"address":"123 Main St, San Francisco, CA"}},{{"name":"Willow Garden Bistro","cuisine":"Mediterranean","rating":4.6,"priceLevel":2,"address":"456 Oak Ave, San Francisco, CA"}}]
Return only the JSON array."#,
        count = RESTAURANT_COUNT,
        location = location,
        cuisine_clause = cuisine_clause,
    )
}
