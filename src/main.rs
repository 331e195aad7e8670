use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use affinity_engine::config::{Settings, StoreBackend};
use affinity_engine::routes::{self, compatibility::AppState};
use affinity_engine::services::{
    CacheManager, CachedStore, LexiconSentiment, PostgresClient, ProfileStore, SupabaseClient,
    SupabaseTables,
};
use affinity_engine::Matcher;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for payload errors
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
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Turn malformed request bodies into a JSON 400
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
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

fn other_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, e);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, e))
}

async fn build_store(settings: &Settings) -> io::Result<Arc<dyn ProfileStore>> {
    let timeout = Duration::from_secs(settings.store.request_timeout_secs.unwrap_or(10));

    let base: Arc<dyn ProfileStore> = match settings.store.backend {
        StoreBackend::Supabase => {
            let supabase = settings
                .store
                .supabase
                .as_ref()
                .ok_or_else(|| other_error("Configuration error", "store.supabase is not set"))?;

            let tables = SupabaseTables {
                profiles: supabase.profiles_table.clone(),
                profile_interests: supabase.interests_table.clone(),
                profile_lifestyle: supabase.lifestyle_table.clone(),
            };

            let client = SupabaseClient::new(supabase.url.clone(), supabase.api_key.clone(), tables, timeout)
                .map_err(|e| other_error("Failed to build Supabase client", e))?;

            info!("Supabase profile store initialized");
            Arc::new(client)
        }
        StoreBackend::Postgres => {
            let database = settings
                .store
                .database
                .as_ref()
                .ok_or_else(|| other_error("Configuration error", "store.database is not set"))?;

            let client = PostgresClient::from_settings(
                &database.url,
                database.max_connections,
                database.min_connections,
                database.acquire_timeout_secs,
                database.idle_timeout_secs,
            )
            .await
            .map_err(|e| other_error("Failed to connect to PostgreSQL", e))?;

            info!("PostgreSQL profile store initialized");
            Arc::new(client)
        }
    };

    if !settings.cache.enabled {
        return Ok(base);
    }

    let ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_size = settings.cache.l1_cache_size.unwrap_or(10_000);

    // The service keeps running on the in-process tier if Redis is unreachable
    let cache = match CacheManager::new(settings.cache.redis_url.as_deref(), l1_size, ttl).await {
        Ok(cache) => cache,
        Err(e) => {
            warn!("Failed to connect to Redis ({}), using in-process cache only", e);
            CacheManager::in_memory(l1_size, ttl)
        }
    };

    info!(
        "Profile cache enabled (L1: {} entries, TTL: {}s, redis: {})",
        l1_size,
        ttl,
        cache.has_redis()
    );

    Ok(Arc::new(CachedStore::new(base, Arc::new(cache))))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Affinity Engine compatibility service...");

    let store = build_store(&settings).await?;

    let weights = settings.scoring_weights();
    let matcher = Matcher::new(
        weights,
        settings.scoring.calibration_exponent,
        LexiconSentiment::shared(),
    );

    info!(
        "Matcher initialized with weights: {:?}, calibration exponent {}",
        weights, settings.scoring.calibration_exponent
    );

    let app_state = AppState {
        store,
        matcher,
        max_candidates: settings.matching.max_candidates,
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
