use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LyricsQuery {
    #[serde(default)]
    pub track: String,
    #[serde(default)]
    pub artist: String,
    #[serde(rename = "targetLang")]
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LyricsOut {
    pub original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<String>,
}
