//! OpenAI-compatible chat-completions adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use parley_core::{CapabilityError, CompletionRequest, LanguageModel, LlmProviderConfig};

use crate::http::{status_error, transport_error};

const SERVICE: &str = "chat-completions";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn request_body<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatCompletionBody<'a> {
    let mut messages = Vec::with_capacity(2);
    if !request.system_prompt.is_empty() {
        messages.push(ChatMessage {
            role: "system",
            content: &request.system_prompt,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: &request.user_content,
    });

    ChatCompletionBody {
        model,
        messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

fn first_content(response: ChatCompletionResponse) -> Result<String, CapabilityError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| CapabilityError::InvalidResponse("completion without choices".into()))
}

/// [`LanguageModel`] speaking the `/chat/completions` protocol.
///
/// The API key is read from the configured environment variable on every
/// call, so a missing key surfaces as `Unauthorized` rather than a startup
/// failure.
pub struct OpenAiChat {
    client: Client,
    config: LlmProviderConfig,
}

impl OpenAiChat {
    pub fn new(client: Client, config: LlmProviderConfig) -> Self {
        Self { client, config }
    }

    fn api_key(&self) -> Result<String, CapabilityError> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CapabilityError::Unauthorized(format!("{} is not set", self.config.api_key_env))
            })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CapabilityError> {
        let key = self.api_key()?;
        let body = request_body(&self.config.model, request);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response.status()));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        first_content(parsed)
    }
}
