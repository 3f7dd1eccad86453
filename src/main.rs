use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use calm_table::config::Settings;
use calm_table::core::discovery::{discovery_options, Discovery};
use calm_table::routes::{self, AppState};
use calm_table::services::{ApiCheck, DiscoveryCache, GeminiClient, PlacesClient, ProfileStore};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // LOG_LEVEL / LOG_FORMAT take precedence over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Calm Table discovery service...");

    let gemini = GeminiClient::new(
        settings.gemini.endpoint.clone(),
        settings.gemini.api_key.clone(),
        settings.gemini.timeout_secs,
    );

    if gemini.has_api_key() {
        match gemini.check_api().await {
            ApiCheck::Ok => info!("Gemini API key verified"),
            ApiCheck::Failed { error } => warn!("Gemini API check failed: {}", error),
        }
    } else {
        error!("GEMINI_API_KEY is not set; discovery requests will fail until it is configured");
    }

    let places = PlacesClient::new(
        settings.places.endpoint.clone(),
        settings.places.api_key.clone(),
        settings.places.timeout_secs,
    );

    let discovery_settings = &settings.discovery;
    let cache = DiscoveryCache::new(
        discovery_settings.cache_mode,
        discovery_settings.cache_ttl(),
        discovery_settings.max_cache_entries,
    );

    info!(
        "Discovery cache initialized ({:?}, TTL: {}s)",
        discovery_settings.cache_mode, discovery_settings.cache_ttl_secs
    );

    let discovery = Discovery::new(
        gemini,
        cache,
        discovery_options(
            &discovery_settings.model,
            discovery_settings.max_output_tokens,
            discovery_settings.temperature,
        ),
    );

    info!("Discovery initialized with model {}", discovery_settings.model);

    let app_state = AppState::new(discovery, ProfileStore::new(), places)
        .with_fallback_location(discovery_settings.fallback_location())
        .with_request_timeout(discovery_settings.request_timeout());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes::<GeminiClient>)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
