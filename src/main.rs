use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use case_match::config::Settings;
use case_match::core::{KeywordVocabulary, Matcher};
use case_match::routes::{self, AppState};
use case_match::services::{
    CachedCaseRepository, CaseRepository, InMemoryCaseStore, MatchService, PostgresCaseStore, ProspectLog,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting case matching service...");

    let (cases, prospects) = build_stores(&settings).await?;

    // Catalog cache in front of the store
    let cases: Arc<dyn CaseRepository> = if settings.cache.enabled {
        let ttl = settings.cache.ttl_secs.unwrap_or(300);
        info!("Catalog cache enabled (TTL: {}s)", ttl);
        Arc::new(CachedCaseRepository::new(cases, ttl))
    } else {
        cases
    };

    let vocabulary = KeywordVocabulary::new(&settings.matching.keywords);
    if vocabulary.is_empty() {
        warn!("Keyword vocabulary is empty; challenges will never contribute to scores");
    }
    info!("Matcher initialized with {} keywords", vocabulary.len());

    let mut service = MatchService::new(cases, Matcher::new(vocabulary));
    if settings.matching.record_prospects {
        service = service.with_prospect_log(prospects);
    }

    let app_state = AppState { service };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(routes::handle_path_error))
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

/// PostgreSQL when a database URL is configured, otherwise an in-memory catalog
async fn build_stores(
    settings: &Settings,
) -> std::io::Result<(Arc<dyn CaseRepository>, Arc<dyn ProspectLog>)> {
    let db = &settings.database;

    if let Some(url) = db.url.as_deref().filter(|url| !url.is_empty()) {
        let store = PostgresCaseStore::from_settings(
            url,
            db.max_connections,
            db.min_connections,
            db.acquire_timeout_secs,
            db.idle_timeout_secs,
        )
        .await
        .map_err(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

        info!("PostgreSQL store initialized (max: {} connections)", db.max_connections.unwrap_or(10));

        let store = Arc::new(store);
        let cases: Arc<dyn CaseRepository> = store.clone();
        let prospects: Arc<dyn ProspectLog> = store;
        return Ok((cases, prospects));
    }

    warn!("No database URL configured, using in-memory case catalog");

    let store = match db.seed_path.as_deref() {
        Some(path) => InMemoryCaseStore::from_json_file(path).map_err(|e| {
            error!("Failed to load seed catalog: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?,
        None => InMemoryCaseStore::default(),
    };

    let store = Arc::new(store);
    let cases: Arc<dyn CaseRepository> = store.clone();
    let prospects: Arc<dyn ProspectLog> = store;
    Ok((cases, prospects))
}
