// In-memory stores used by the handler tests.
use std::collections::BTreeMap;
use std::sync::Mutex;
use async_trait::async_trait;
use crate::models::post::{NewPost, Post};
use crate::models::user::User;
use super::post_repository::PostRepository;
use super::user_repository::UserRepository;
use super::RepoError;

#[derive(Default)]
pub struct MemoryUserRepository {
    pub users: Mutex<BTreeMap<String, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), RepoError> {
        self.users.lock().unwrap().insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPostRepository {
    posts: Mutex<BTreeMap<i64, Post>>,
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<i64, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let id = posts.keys().next_back().copied().unwrap_or(0) + 1;
        posts.insert(id, Post {
            id,
            title: post.title,
            content: post.content,
            background_image: post.background_image,
        });
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }
}

/// Behaves like a pool that has been shut down.
pub struct ClosedRepository;

#[async_trait]
impl UserRepository for ClosedRepository {
    async fn upsert(&self, _user: &User) -> Result<(), RepoError> {
        Err(RepoError::Pool(deadpool_postgres::PoolError::Closed))
    }
}

#[async_trait]
impl PostRepository for ClosedRepository {
    async fn create(&self, _post: NewPost) -> Result<i64, RepoError> {
        Err(RepoError::Pool(deadpool_postgres::PoolError::Closed))
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Pool(deadpool_postgres::PoolError::Closed))
    }

    async fn get(&self, _id: i64) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Pool(deadpool_postgres::PoolError::Closed))
    }
}
