// src/repositories/user_repository.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use crate::models::user::User;
use super::RepoError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user, or overwrite every non-key column of the existing row.
    async fn upsert(&self, user: &User) -> Result<(), RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool,
}

impl PgUserRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(
                "INSERT INTO users (id, email, display_name, country, followers, profile_image_url, product)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 ON CONFLICT (id) DO UPDATE SET
                    email = EXCLUDED.email,
                    display_name = EXCLUDED.display_name,
                    country = EXCLUDED.country,
                    followers = EXCLUDED.followers,
                    profile_image_url = EXCLUDED.profile_image_url,
                    product = EXCLUDED.product",
            )
            .await?;

        client
            .execute(
                &stmt,
                &[
                    &user.id,
                    &user.email,
                    &user.display_name,
                    &user.country,
                    &user.followers,
                    &user.profile_image_url,
                    &user.product,
                ],
            )
            .await?;
        Ok(())
    }
}
