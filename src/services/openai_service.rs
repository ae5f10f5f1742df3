// src/services/openai_service.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const TRANSLATION_MAX_TOKENS: u32 = 1000;
const IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("openai error: {0} - {1}")]
    Status(u16, String),
    #[error("invalid json from openai: {0}")]
    Json(#[from] serde_json::Error),
    #[error("openai returned an empty {0}")]
    EmptyResponse(&'static str),
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

/// Chat completion and image generation against an OpenAI-compatible API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    image_model: String,
}

impl OpenAiClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        chat_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            chat_model: chat_model.into(),
            image_model: image_model.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, AiError> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(AiError::Status(status.as_u16(), text));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Translates the whole text in one completion call. Long inputs may come
    /// back truncated by the token ceiling.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, AiError> {
        let request = ChatCompletionRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage {
                    role: "user",
                    content: format!("Translate the following sentences to {}:\n\n{}", target_lang, text),
                },
            ],
            max_tokens: TRANSLATION_MAX_TOKENS,
        };

        let resp: ChatCompletionResponse = self.post_json("chat/completions", &request).await?;
        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(AiError::EmptyResponse("translation"))
    }

    /// Requests one square image and returns the provider's temporary URL.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, AiError> {
        let request = ImageGenerationRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
        };

        let resp: ImageGenerationResponse = self.post_json("images/generations", &request).await?;
        resp.data
            .into_iter()
            .next()
            .and_then(|img| img.url)
            .filter(|url| !url.is_empty())
            .ok_or(AiError::EmptyResponse("image url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(Client::new(), server.uri(), "sk-test", "gpt-3.5-turbo", "dall-e-3")
    }

    #[tokio::test]
    async fn translate_sends_prompt_and_trims_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 1000,
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "Translate the following sentences to ko:\n\nhello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "  안녕  \n"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(client(&server).translate("hello", "ko").await.unwrap(), "안녕");
    }

    #[tokio::test]
    async fn blank_translation_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "   "}}]
            })))
            .mount(&server)
            .await;

        let err = client(&server).translate("hello", "ko").await.unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn generate_image_asks_for_one_square_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(json!({
                "model": "dall-e-3", "prompt": "a cat", "n": 1, "size": "1024x1024"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created": 1, "data": [{"url": "https://cdn.example/img.png"}]
            })))
            .mount(&server)
            .await;

        let url = client(&server).generate_image("a cat").await.unwrap();
        assert_eq!(url, "https://cdn.example/img.png");
    }

    #[tokio::test]
    async fn provider_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("content_policy_violation"))
            .mount(&server)
            .await;

        let err = client(&server).generate_image("bad").await.unwrap_err();
        assert!(matches!(err, AiError::Status(400, ref b) if b == "content_policy_violation"));
    }
}
