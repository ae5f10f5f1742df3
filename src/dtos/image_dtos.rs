use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateImageIn {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageUrlOut {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}
