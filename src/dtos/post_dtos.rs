use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::post::{NewPost, Post};

#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    pub title: String,
    #[serde(default)]
    pub content: Value,
    #[serde(rename = "backgroundImage", default)]
    pub background_image: Option<String>,
}

impl From<CreatePostDTO> for NewPost {
    fn from(dto: CreatePostDTO) -> Self {
        NewPost {
            title: dto.title,
            content: dto.content,
            background_image: dto.background_image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PostOut {
    pub id: i64,
    pub title: String,
    pub content: Value,
    #[serde(rename = "backgroundImage")]
    pub background_image: Option<String>,
}

impl From<Post> for PostOut {
    fn from(post: Post) -> Self {
        PostOut {
            id: post.id,
            title: post.title,
            content: post.content,
            background_image: post.background_image,
        }
    }
}
