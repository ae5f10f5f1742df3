pub mod asset_store;
pub mod image_service;
pub mod lyrics_service;
pub mod openai_service;
