use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Base URL for the Places (legacy) web service
pub const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

/// Radius of the location bias circle, in meters
const LOCATION_BIAS_RADIUS_M: u32 = 5000;

/// Errors that can occur while looking up a place photo
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Places API returned status {0}")]
    Status(String),
}

/// Photo-lookup collaborator
///
/// Lookups are best-effort: `None` means "no photo", whatever the cause.
pub trait PhotoLookup: Send + Sync {
    fn get_place_photo(
        &self,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Option<String>> + Send;
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<PlaceCandidate>,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    photos: Vec<PhotoRef>,
}

#[derive(Debug, Deserialize)]
struct PhotoRef {
    #[serde(default)]
    photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    photos: Vec<PhotoRef>,
}

/// Google Places photo client
///
/// Finds the place by name near the given coordinates, falls back to the
/// place details when the search result carries no photo, then resolves
/// the photo redirect to its final image URL.
pub struct PlacesClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl PlacesClient {
    pub fn new(base_url: String, api_key: Option<String>, timeout_secs: u64) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!("Places API key not set; restaurant photos fall back to the curated pool");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            base_url,
            api_key,
            client,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn lookup(
        &self,
        api_key: &str,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, PlacesError> {
        let location_bias = format!("circle:{}@{},{}", LOCATION_BIAS_RADIUS_M, latitude, longitude);
        let find_url = format!(
            "{}?input={}&inputtype=textquery&fields=place_id,photos&locationbias={}&key={}",
            self.url("findplacefromtext/json"),
            urlencoding::encode(name.trim()),
            urlencoding::encode(&location_bias),
            urlencoding::encode(api_key)
        );

        let found: FindPlaceResponse = self.client.get(&find_url).send().await?.json().await?;
        if found.status != "OK" {
            return Err(PlacesError::Status(found.status));
        }
        let Some(candidate) = found.candidates.into_iter().next() else {
            return Ok(None);
        };

        let mut photo_ref = candidate
            .photos
            .into_iter()
            .find_map(|p| p.photo_reference);

        if photo_ref.is_none() {
            if let Some(place_id) = candidate.place_id {
                let details_url = format!(
                    "{}?place_id={}&fields=photos&key={}",
                    self.url("details/json"),
                    urlencoding::encode(&place_id),
                    urlencoding::encode(api_key)
                );
                let details: DetailsResponse =
                    self.client.get(&details_url).send().await?.json().await?;
                photo_ref = details
                    .result
                    .and_then(|r| r.photos.into_iter().find_map(|p| p.photo_reference));
            }
        }

        let Some(photo_ref) = photo_ref else {
            return Ok(None);
        };

        let photo_url = format!(
            "{}?maxwidth=400&photoreference={}&key={}",
            self.url("photo"),
            urlencoding::encode(&photo_ref),
            urlencoding::encode(api_key)
        );

        // The photo endpoint redirects to the image itself; hand out the final URL
        match self.client.get(&photo_url).send().await {
            Ok(response) => Ok(Some(response.url().to_string())),
            Err(e) => {
                tracing::debug!("Photo redirect not resolved: {}", e);
                Ok(Some(photo_url))
            }
        }
    }
}

impl PhotoLookup for PlacesClient {
    async fn get_place_photo(&self, name: &str, latitude: f64, longitude: f64) -> Option<String> {
        let api_key = self.api_key.as_deref()?;
        match self.lookup(api_key, name, latitude, longitude).await {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Place photo lookup failed for {}: {}", name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_without_key() {
        let client = PlacesClient::new(PLACES_API_BASE.to_string(), None, 10);
        assert!(!client.is_enabled());
        assert_eq!(client.get_place_photo("Willow", 1.0, 2.0).await, None);
    }

    #[test]
    fn test_url_joins_path() {
        let client = PlacesClient::new("https://places.test/api/".to_string(), Some("k".to_string()), 10);
        assert_eq!(client.url("photo"), "https://places.test/api/photo");
    }
}
