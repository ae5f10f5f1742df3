pub mod image_dtos;
pub mod lyrics_dtos;
pub mod post_dtos;
pub mod user_dtos;
