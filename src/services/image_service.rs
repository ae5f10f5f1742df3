// src/services/image_service.rs
use chrono::Utc;
use log::info;
use reqwest::Client;
use thiserror::Error;
use crate::config::ImageDelivery;
use crate::services::asset_store::AssetStore;
use crate::services::openai_service::{AiError, OpenAiClient};

/// Failure of one stage of the generate-and-store pipeline.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image generation failed: {0}")]
    Generation(#[from] AiError),
    #[error("image download failed: {0}")]
    Download(String),
    #[error("saving image failed: {0}")]
    Write(#[from] std::io::Error),
}

impl ImageError {
    pub fn stage(&self) -> &'static str {
        match self {
            ImageError::Generation(_) => "generation",
            ImageError::Download(_) => "download",
            ImageError::Write(_) => "write",
        }
    }
}

/// Fetches the bytes behind a provider's temporary image URL.
pub async fn download(client: &Client, url: &str) -> Result<Vec<u8>, ImageError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| ImageError::Download(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ImageError::Download(format!("{} from {}", status, url)));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ImageError::Download(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Generates an image for `description` and returns what the caller should use as
/// `imageUrl`: the stored `uploads/...` path, or the provider URL in remote mode.
pub async fn generate_and_store(
    openai: &OpenAiClient,
    http: &Client,
    store: &AssetStore,
    delivery: ImageDelivery,
    description: &str,
) -> Result<String, ImageError> {
    let remote_url = openai.generate_image(description).await?;
    info!("Image generated for prompt ({} chars)", description.len());

    if delivery == ImageDelivery::Remote {
        return Ok(remote_url);
    }

    let bytes = download(http, &remote_url).await?;
    let file_name = AssetStore::generated_file_name(Utc::now());
    let relative = store.save(&file_name, &bytes).await?;
    info!("Generated image stored at {} ({} bytes)", relative, bytes.len());
    Ok(relative)
}
