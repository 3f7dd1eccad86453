use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::Location;
use crate::services::cache::CacheMode;
use crate::services::gemini::{DEFAULT_MODEL, GEMINI_API_BASE};
use crate::services::location::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::services::places::PLACES_API_BASE;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub places: PlacesSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_gemini_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSettings {
    #[serde(default = "default_places_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PlacesSettings {
    fn default() -> Self {
        Self {
            endpoint: default_places_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub cache_mode: CacheMode,
    #[serde(default = "default_max_cache_entries")]
    pub max_cache_entries: u64,
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    #[serde(default)]
    pub default_city: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_mode: CacheMode::default(),
            max_cache_entries: default_max_cache_entries(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            default_city: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl DiscoverySettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Upper bound on one discovery request before it is abandoned
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Location used when the device location cannot be resolved
    pub fn fallback_location(&self) -> Location {
        Location {
            latitude: self.default_latitude,
            longitude: self.default_longitude,
            city_or_region: self.default_city.clone(),
        }
    }
}

fn default_gemini_endpoint() -> String { GEMINI_API_BASE.to_string() }
fn default_places_endpoint() -> String { PLACES_API_BASE.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_max_output_tokens() -> u32 { 2048 }
fn default_temperature() -> f32 { 0.3 }
fn default_cache_ttl_secs() -> u64 { 15 * 60 }
fn default_max_cache_entries() -> u64 { 256 }
fn default_latitude() -> f64 { DEFAULT_LATITUDE }
fn default_longitude() -> f64 { DEFAULT_LONGITUDE }
fn default_request_timeout_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CALM__)
    /// 5. GEMINI_API_KEY / GOOGLE_PLACES_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CALM__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CALM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_api_key_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CALM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Well-known API key variables win over file values
fn apply_api_key_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let gemini_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let places_key = env::var("GOOGLE_PLACES_API_KEY").ok().filter(|k| !k.trim().is_empty());

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = gemini_key {
        builder = builder.set_override("gemini.api_key", key)?;
    }
    if let Some(key) = places_key {
        builder = builder.set_override("places.api_key", key)?;
    }

    builder.build()
}
