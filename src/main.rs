use actix_web::http::StatusCode;
use actix_web::middleware::{self, ErrorHandlers};
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;

mod blog;
mod config;
mod db;
mod errors;
mod events;
mod middlewares;
mod routes;
mod service;
mod types;

use config::{AppConfig, StorageBackend, IS_DEV};
use db::{connect_with_retry, MemoryPostStore, MongoPostStore, PostStore, StoreError};
use errors::not_found_handler;
use events::PostEvents;
use middlewares::RequestLogging;
use routes::api_scope;
use service::PostService;

async fn open_store(storage: &StorageBackend) -> Result<Arc<dyn PostStore>, StoreError> {
    match storage {
        StorageBackend::MongoDb(mongo) => {
            info!("Connecting to MongoDB database {}...", mongo.database);
            let mongodb = connect_with_retry(mongo)
                .await
                .map_err(StoreError::Unavailable)?;
            let store = MongoPostStore::new(mongodb.database);
            store.ensure_indexes().await?;
            info!("MongoDB connected successfully");
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory store: admin edits are lost on restart");
            Ok(Arc::new(MemoryPostStore::new()))
        }
    }
}

// -------------------- Server bootstrap --------------------
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load env
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let defaults = match blog::load_default_posts() {
        Ok(posts) => posts,
        Err(e) => {
            error!("Bundled post catalogue is malformed: {}", e);
            std::process::exit(1);
        }
    };

    let store = match open_store(&config.storage).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open post store: {}", e);
            std::process::exit(1);
        }
    };

    let service = web::Data::new(PostService::new(
        store,
        defaults,
        PostEvents::new(),
        config.save_cooldown,
    ));
    actix_web::rt::spawn(events::log_events(service.events().subscribe()));

    info!("Starting server at http://{}:{}", config.host, config.port);
    info!(
        "Environment: {}",
        if *IS_DEV { "development" } else { "production" }
    );

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            // Middleware
            .wrap(
                ErrorHandlers::new().handler(StatusCode::NOT_FOUND, not_found_handler),
            )
            .wrap(RequestLogging)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            // Routes
            .service(api_scope())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
