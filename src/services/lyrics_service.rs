// src/services/lyrics_service.rs
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LyricsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("musixmatch error: {0} - {1}")]
    Status(u16, String),
    #[error("malformed musixmatch response: {0}")]
    Malformed(String),
}

/// Client for the Musixmatch `matcher.lyrics.get` endpoint.
#[derive(Clone)]
pub struct LyricsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl LyricsClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Returns the lyric body, or `Ok(None)` when Musixmatch has no lyric for the pair.
    pub async fn fetch_lyrics(&self, track: &str, artist: &str) -> Result<Option<String>, LyricsError> {
        let url = format!("{}/matcher.lyrics.get", self.base_url.trim_end_matches('/'));

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q_track", track),
                ("q_artist", artist),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(LyricsError::Status(status.as_u16(), text));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| LyricsError::Malformed(format!("invalid json: {}", e)))?;
        lyric_body(&json)
    }
}

/// Pulls `message.body.lyrics.lyrics_body` out of a matcher response.
///
/// Musixmatch answers unknown tracks with HTTP 200 and a 404 in
/// `message.header.status_code`, with `body` reduced to an empty array.
fn lyric_body(json: &Value) -> Result<Option<String>, LyricsError> {
    let message = json
        .get("message")
        .ok_or_else(|| LyricsError::Malformed("missing `message`".to_string()))?;

    let status_code = message
        .get("header")
        .and_then(|h| h.get("status_code"))
        .and_then(|c| c.as_u64());
    if status_code == Some(404) {
        return Ok(None);
    }
    if let Some(code) = status_code.filter(|c| *c >= 400) {
        return Err(LyricsError::Status(code as u16, message.to_string()));
    }

    let body = message
        .get("body")
        .and_then(|b| b.get("lyrics"))
        .and_then(|l| l.get("lyrics_body"))
        .and_then(|b| b.as_str())
        .filter(|b| !b.trim().is_empty());

    Ok(body.map(|b| b.to_string()))
}
