use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use compass_match::config::{Settings, StoreBackend};
use compass_match::core::{Matcher, ProposalSynthesizer};
use compass_match::routes::{self, AppState};
use compass_match::services::{DataStore, FreelanceService, InMemoryStore, SupabaseClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
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

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn DataStore>> {
    match settings.store.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Supabase => {
            let client = SupabaseClient::new(
                settings.supabase.url.clone(),
                settings.supabase.api_key.clone(),
                settings.supabase.timeout_secs.unwrap_or(30),
            )
            .map_err(|e| {
                error!("Failed to create Supabase client: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            info!("Supabase client initialized for {}", settings.supabase.url);
            Ok(Arc::new(client))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Compass Match service...");

    let store = build_store(&settings)?;

    let matcher = Matcher::new(settings.matching.default_limit, settings.matching.max_limit);
    let synthesizer = ProposalSynthesizer::new(settings.proposal.missing_fields);

    info!(
        "Matcher initialized (default limit {}, max {}), missing proposal fields render as {:?}",
        settings.matching.default_limit,
        settings.matching.max_limit,
        synthesizer.missing_fields()
    );

    let app_state = AppState {
        service: FreelanceService::new(store, matcher, synthesizer),
    };

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
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
