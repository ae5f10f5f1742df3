// src/repositories/post_repository.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use crate::models::post::{NewPost, Post};
use super::RepoError;

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Stores the post and returns the id assigned by the database.
    async fn create(&self, post: NewPost) -> Result<i64, RepoError>;

    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// `Ok(None)` when no row carries this id.
    async fn get(&self, id: i64) -> Result<Option<Post>, RepoError>;
}

#[derive(Clone)]
pub struct PgPostRepository {
    pool: Pool,
}

impl PgPostRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn row_to_post(row: &Row) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        background_image: row.get("background_image"),
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, post: NewPost) -> Result<i64, RepoError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO posts (title, content, background_image) VALUES ($1, $2, $3) RETURNING id",
                &[&post.title, &post.content, &post.background_image],
            )
            .await?;
        Ok(row.get("id"))
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, title, content, background_image FROM posts ORDER BY id",
                &[],
            )
            .await?;
        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, title, content, background_image FROM posts WHERE id = $1",
                &[&id],
            )
            .await?;
        Ok(row.as_ref().map(row_to_post))
    }
}
