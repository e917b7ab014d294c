//! Provider catalog and the streaming chat-completions client.
//!
//! Any endpoint speaking the OpenAI chat-completions protocol works; the
//! catalog just supplies sensible base URLs per provider kind.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{AiError, AiResult};
use crate::types::GenerationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderKind {
    OpenAi,
    OpenRouter,
    Custom,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("https://api.openai.com/v1"),
            ProviderKind::OpenRouter => Some("https://openrouter.ai/api/v1"),
            ProviderKind::Custom => None,
        }
    }
}

/// Resolved provider settings, built by the server from its config.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Overrides the kind's default; required for `Custom`.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl ProviderConfig {
    pub fn resolved_base_url(&self) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| self.kind.default_base_url().map(str::to_string))
    }
}

/// A stream of text deltas from the model.
pub type DeltaStream = BoxStream<'static, AiResult<String>>;

/// Trait for the provider client, kept narrow so tests can substitute a
/// scripted stream.
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    async fn stream_completion(&self, request: GenerationRequest) -> AiResult<DeltaStream>;
}

// === Wire types (OpenAI chat-completions protocol) ===

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

/// Consumes complete SSE lines from `buffer`, pushing any text deltas (or
/// parse errors) onto `out`. Partial trailing lines stay in the buffer for
/// the next network chunk.
fn drain_sse_buffer(buffer: &mut String, out: &mut Vec<AiResult<String>>) {
    while let Some(newline) = buffer.find('\n') {
        let line = buffer[..newline].trim().to_string();
        buffer.drain(..=newline);

        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data.is_empty() || data == "[DONE]" {
            continue;
        }

        match serde_json::from_str::<ChatCompletionChunk>(data) {
            Ok(chunk) => {
                if let Some(delta) = chunk
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                {
                    if !delta.is_empty() {
                        out.push(Ok(delta));
                    }
                }
            }
            Err(e) => out.push(Err(AiError::Stream(e.to_string()))),
        }
    }
}

/// Reqwest-backed client speaking SSE against `/chat/completions`.
pub struct HttpChatClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl HttpChatClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatCompletionClient for HttpChatClient {
    async fn stream_completion(&self, request: GenerationRequest) -> AiResult<DeltaStream> {
        let base_url = self
            .config
            .resolved_base_url()
            .ok_or(AiError::MissingBaseUrl)?;
        let api_key = self
            .config
            .api_key
            .clone()
            .ok_or(AiError::MissingApiKey)?;

        let body = ChatCompletionBody {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: true,
        };

        let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        debug!("Streaming completion from {} ({})", url, request.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let deltas = response
            .bytes_stream()
            .scan(String::new(), |buffer, chunk| {
                let mut out = Vec::new();
                match chunk {
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        drain_sse_buffer(buffer, &mut out);
                    }
                    Err(e) => out.push(Err(AiError::Http(e))),
                }
                futures::future::ready(Some(stream::iter(out)))
            })
            .flatten()
            .boxed();

        Ok(deltas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_urls() {
        assert_eq!(
            ProviderKind::OpenAi.default_base_url(),
            Some("https://api.openai.com/v1")
        );
        assert!(ProviderKind::Custom.default_base_url().is_none());

        let config = ProviderConfig {
            kind: ProviderKind::OpenRouter,
            base_url: Some("http://localhost:8081/v1".to_string()),
            api_key: None,
        };
        assert_eq!(
            config.resolved_base_url().as_deref(),
            Some("http://localhost:8081/v1")
        );
    }

    #[test]
    fn test_drain_sse_buffer_parses_deltas() {
        let mut buffer = String::from(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Day \"}}]}\n\
             data: {\"choices\":[{\"delta\":{\"content\":\"1\"}}]}\n\
             data: [DONE]\n",
        );
        let mut out = Vec::new();
        drain_sse_buffer(&mut buffer, &mut out);

        let deltas: Vec<String> = out.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(deltas, vec!["Day ", "1"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_sse_buffer_keeps_partial_line() {
        let mut buffer = String::from(
            "data: {\"choices\":[{\"delta\":{\"content\":\"hello\"}}]}\ndata: {\"choi",
        );
        let mut out = Vec::new();
        drain_sse_buffer(&mut buffer, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(buffer, "data: {\"choi");
    }

    #[test]
    fn test_drain_sse_buffer_ignores_comments_and_empty_deltas() {
        let mut buffer = String::from(
            ": keep-alive\n\
             \n\
             data: {\"choices\":[{\"delta\":{}}]}\n\
             data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n",
        );
        let mut out = Vec::new();
        drain_sse_buffer(&mut buffer, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_drain_sse_buffer_surfaces_malformed_json() {
        let mut buffer = String::from("data: {not json}\n");
        let mut out = Vec::new();
        drain_sse_buffer(&mut buffer, &mut out);
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Err(AiError::Stream(_))));
    }
}
