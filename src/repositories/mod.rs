pub mod post_repository;
pub mod user_repository;
#[cfg(test)]
pub mod memory;

use deadpool_postgres::{Pool, PoolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {}", pg_detail(.0))]
    Postgres(#[from] tokio_postgres::Error),
}

/// `tokio_postgres::Error` displays as a bare "db error"; pull the server's
/// SQLSTATE and message out of it.
fn pg_detail(e: &tokio_postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => {
            let mut out = format!("{} {}: {}", db.severity(), db.code().code(), db.message());
            if let Some(detail) = db.detail() {
                out.push_str(&format!(" ({})", detail));
            }
            out
        }
        None => match std::error::Error::source(e) {
            Some(cause) => format!("{}: {}", e, cause),
            None => e.to_string(),
        },
    }
}

// json rather than jsonb: jsonb rejects \u0000 inside strings
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id                TEXT PRIMARY KEY,
    email             TEXT,
    display_name      TEXT,
    country           TEXT,
    followers         BIGINT,
    profile_image_url TEXT,
    product           TEXT
);

CREATE TABLE IF NOT EXISTS posts (
    id               BIGSERIAL PRIMARY KEY,
    title            TEXT NOT NULL,
    content          JSON NOT NULL,
    background_image TEXT
);
"#;

/// Creates the `users` and `posts` tables when they are missing.
pub async fn ensure_schema(pool: &Pool) -> Result<(), RepoError> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA).await?;
    Ok(())
}
