use serde::Deserialize;
use crate::models::user::User;

/// Profile as posted by the frontend after the streaming-service login.
#[derive(Debug, Deserialize)]
pub struct SaveUserIn {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub country: Option<String>,
    pub followers: Option<i64>,
    pub profile_image_url: Option<String>,
    pub product: Option<String>,
}

impl From<SaveUserIn> for User {
    fn from(dto: SaveUserIn) -> Self {
        User {
            id: dto.id,
            email: dto.email,
            display_name: dto.display_name,
            country: dto.country,
            followers: dto.followers,
            profile_image_url: dto.profile_image_url,
            product: dto.product,
        }
    }
}
