use serde_json::Value;

/// Row of the `posts` table. `content` is stored as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: Value,
    pub background_image: Option<String>,
}

/// Insert payload; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: Value,
    pub background_image: Option<String>,
}
