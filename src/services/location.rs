use std::future::Future;
use thiserror::Error;

use crate::models::Location;

/// San Francisco, used when no device location is available
pub const DEFAULT_LATITUDE: f64 = 37.7749;
pub const DEFAULT_LONGITUDE: f64 = -122.4194;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Device location collaborator
pub trait LocationProvider: Send + Sync {
    fn current_location(&self) -> impl Future<Output = Result<Location, LocationError>> + Send;
}

/// Location as reported by the client device
///
/// No coordinates at all means the device did not share its location.
/// Only one of the two is treated as an unusable fix.
#[derive(Debug, Clone, Default)]
pub struct ReportedLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city_or_region: Option<String>,
}

impl ReportedLocation {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>, city_or_region: Option<String>) -> Self {
        Self {
            latitude,
            longitude,
            city_or_region,
        }
    }
}

impl LocationProvider for ReportedLocation {
    async fn current_location(&self) -> Result<Location, LocationError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Location {
                latitude,
                longitude,
                city_or_region: self.city_or_region.clone(),
            }),
            (None, None) => Err(LocationError::PermissionDenied),
            _ => Err(LocationError::Unavailable(
                "latitude and longitude must be sent together".to_string(),
            )),
        }
    }
}

pub fn default_location() -> Location {
    Location {
        latitude: DEFAULT_LATITUDE,
        longitude: DEFAULT_LONGITUDE,
        city_or_region: None,
    }
}

/// Best-effort location: falls back when the provider fails
pub async fn resolve_location<P: LocationProvider>(provider: &P, fallback: &Location) -> Location {
    match provider.current_location().await {
        Ok(location) => location,
        Err(e) => {
            tracing::warn!(
                "Using fallback location ({}, {}): {}",
                fallback.latitude,
                fallback.longitude,
                e
            );
            fallback.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reported_location() {
        let reported = ReportedLocation::new(Some(51.5), Some(-0.12), Some("London".to_string()));
        let resolved = resolve_location(&reported, &default_location()).await;

        assert_eq!(
            resolved,
            Location {
                latitude: 51.5,
                longitude: -0.12,
                city_or_region: Some("London".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_coordinates_fall_back() {
        let reported = ReportedLocation::new(None, None, Some("London".to_string()));
        assert!(matches!(
            reported.current_location().await,
            Err(LocationError::PermissionDenied)
        ));

        let resolved = resolve_location(&reported, &default_location()).await;
        assert_eq!(resolved.latitude, DEFAULT_LATITUDE);
        assert_eq!(resolved.longitude, DEFAULT_LONGITUDE);
        assert_eq!(resolved.city_or_region, None);
    }

    #[tokio::test]
    async fn test_partial_coordinates_fall_back() {
        let reported = ReportedLocation::new(Some(51.5), None, None);
        assert!(matches!(
            reported.current_location().await,
            Err(LocationError::Unavailable(_))
        ));

        let fallback = Location {
            latitude: 40.7128,
            longitude: -74.006,
            city_or_region: Some("New York, NY".to_string()),
        };
        assert_eq!(resolve_location(&reported, &fallback).await, fallback);
    }
}
