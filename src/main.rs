// src/main.rs
mod config;
mod dtos;
mod handlers;
mod models;
mod repositories;
mod services;

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::{App, HttpServer, web, middleware::Logger};
use log::{info, error};
use reqwest::Client;

use crate::config::{AppConfig, ImageDelivery, get_pg_pool, mask_key};
use crate::repositories::ensure_schema;
use crate::repositories::post_repository::{PgPostRepository, PostRepository};
use crate::repositories::user_repository::{PgUserRepository, UserRepository};
use crate::services::asset_store::AssetStore;
use crate::services::lyrics_service::LyricsClient;
use crate::services::openai_service::OpenAiClient;

/// Process-wide clients, built once in `main` and shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub http_client: Client,
    pub lyrics: LyricsClient,
    pub openai: OpenAiClient,
    pub assets: AssetStore,
    pub image_delivery: ImageDelivery,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Musixmatch key: {}", mask_key(&config.musixmatch_api_key));
    info!("OpenAI key: {}", mask_key(&config.openai_api_key));
    info!("Image delivery: {:?}", config.image_delivery);

    let pg_pool = match get_pg_pool() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_schema(&pg_pool).await {
        error!("Failed to prepare database schema: {}", e);
        std::process::exit(1);
    }
    info!("Connected to postgres, schema ready");

    let assets = AssetStore::new(&config.public_dir);
    if let Err(e) = assets.ensure_dirs().await {
        error!("Failed to create uploads directory {}: {}", assets.uploads_dir().display(), e);
        std::process::exit(1);
    }
    info!("Uploads directory: {}", assets.uploads_dir().display());

    let http_client = match Client::builder().user_agent("lyricboard-be/0.1").build() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build http client: {}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState {
        users: Arc::new(PgUserRepository::new(pg_pool.clone())),
        posts: Arc::new(PgPostRepository::new(pg_pool.clone())),
        http_client: http_client.clone(),
        lyrics: LyricsClient::new(
            http_client.clone(),
            config.musixmatch_base_url.clone(),
            config.musixmatch_api_key.clone(),
        ),
        openai: OpenAiClient::new(
            http_client,
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.chat_model.clone(),
            config.image_model.clone(),
        ),
        assets,
        image_delivery: config.image_delivery,
    });

    let allowed_origins = config.allowed_origins.clone();
    let bind_address = format!("0.0.0.0:{}", config.port);
    info!("Server is running on {}", bind_address);

    HttpServer::new(move || {
        let cors = if allowed_origins.is_empty() {
            Cors::permissive()
        } else {
            allowed_origins.iter().fold(
                Cors::default()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["content-type", "accept", "x-requested-with"])
                    .max_age(3600),
                |cors, origin| cors.allowed_origin(origin),
            )
        };

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    pg_pool.close();
    info!("Server stopped, database pool closed");
    Ok(())
}
