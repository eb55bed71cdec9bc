//! Vidcat server binary.
//!
//! Wires up:
//! - The configured video repository (in-memory or Redis)
//! - Filesystem payload storage
//! - The HTTP API

use std::process;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vidcat::adapters::fs::FsVideoData;
use vidcat::adapters::http::{self, auth::UserDirectory, AppState};
use vidcat::adapters::memory::InMemoryVideoRepository;
use vidcat::config::{CatalogConfig, StoreKind};
use vidcat::ports::repository::VideoRepository;
use vidcat::{CatalogService, VideoDataService};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vidcat=info,tower_http=info")),
        )
        .init();

    let config = match CatalogConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let data = match FsVideoData::new(&config.data_dir) {
        Ok(data) => data,
        Err(e) => {
            error!("Invalid data directory: {}", e);
            process::exit(1);
        }
    };

    let app = match config.store {
        StoreKind::Memory => build_app(&config, Arc::new(InMemoryVideoRepository::new()), data),
        StoreKind::Redis => redis_app(&config, data),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr(), e);
            process::exit(1);
        }
    };
    info!(
        "Listening at {} ({:?} store, data in {:?})",
        config.bind_addr(),
        config.store,
        config.data_dir
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server failed: {}", e);
        process::exit(1);
    }
}

fn build_app<R>(config: &CatalogConfig, repo: Arc<R>, data: FsVideoData) -> axum::Router
where
    R: VideoRepository + 'static,
{
    let catalog = Arc::new(CatalogService::new(repo.clone(), config.url_policy));
    let data = Arc::new(VideoDataService::new(repo, data));
    let users = UserDirectory::new(config.users.clone());

    let state = AppState::new(catalog, data, users)
        .with_public_base_url(config.public_base_url.clone());
    http::router(state)
}

#[cfg(feature = "redis")]
fn redis_app(config: &CatalogConfig, data: FsVideoData) -> axum::Router {
    match vidcat::adapters::redis::RedisPool::new(&config.redis_url) {
        Ok(pool) => build_app(config, Arc::new(pool), data),
        Err(e) => {
            error!("Failed to connect to Redis: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(not(feature = "redis"))]
fn redis_app(_config: &CatalogConfig, _data: FsVideoData) -> axum::Router {
    error!("STORE=redis requires the `redis` feature");
    process::exit(1);
}
