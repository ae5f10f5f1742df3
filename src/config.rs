use std::env;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use deadpool_postgres::{Config, Pool, Runtime};
use tokio_postgres::NoTls;

const DEFAULT_MUSIXMATCH_URL: &str = "https://api.musixmatch.com/ws/1.1";
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// How `/generate-image` hands the picture back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDelivery {
    /// download the provider image into `public/uploads` and return the relative path
    Local,
    /// return the provider's temporary URL untouched
    Remote,
}

impl ImageDelivery {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "local" => Ok(ImageDelivery::Local),
            "remote" => Ok(ImageDelivery::Remote),
            other => bail!("IMAGE_DELIVERY must be `local` or `remote`, got `{}`", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub musixmatch_base_url: String,
    pub musixmatch_api_key: String,
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub chat_model: String,
    pub image_model: String,
    pub public_dir: PathBuf,
    pub image_delivery: ImageDelivery,
    pub allowed_origins: Vec<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let musixmatch_api_key = env::var("MUSIXMATCH_API_KEY")
            .context("MUSIXMATCH_API_KEY not set")?;
        let openai_api_key = env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY not set")?;

        let port = match env::var("PORT") {
            Ok(p) => p.trim().parse::<u16>().context("PORT is not a valid port number")?,
            Err(_) => 80,
        };

        // empty list means "allow any origin", same as a bare cors()
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            musixmatch_base_url: env_or("MUSIXMATCH_BASE_URL", DEFAULT_MUSIXMATCH_URL),
            musixmatch_api_key: musixmatch_api_key.trim().to_string(),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_URL),
            openai_api_key: openai_api_key.trim().to_string(),
            chat_model: env_or("OPENAI_CHAT_MODEL", "gpt-3.5-turbo"),
            image_model: env_or("OPENAI_IMAGE_MODEL", "dall-e-3"),
            public_dir: PathBuf::from(env_or("PUBLIC_DIR", "public")),
            image_delivery: ImageDelivery::parse(&env::var("IMAGE_DELIVERY").unwrap_or_default())?,
            allowed_origins,
            port,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub fn mask_key(k: &str) -> String {
    let len = k.chars().count();
    if len <= 8 { return "[REDACTED]".to_string(); }
    let head: String = k.chars().take(4).collect();
    let tail: String = k.chars().skip(len - 4).collect();
    format!("{}***{}", head, tail)
}

pub fn get_pg_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(env::var("PG_HOST").context("PG_HOST not set")?);
    cfg.user = Some(env::var("PG_USER").context("PG_USER not set")?);
    cfg.password = env::var("PG_PASS").ok();
    cfg.dbname = Some(env::var("PG_DB").context("PG_DB not set")?);
    if let Ok(port) = env::var("PG_PORT") {
        cfg.port = Some(port.trim().parse().context("PG_PORT is not a valid port number")?);
    }

    let mut pool_cfg = cfg.pool.take().unwrap_or_default();
    pool_cfg.max_size = 16;
    cfg.pool = Some(pool_cfg);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
       .context("failed to create postgres pool")
}
