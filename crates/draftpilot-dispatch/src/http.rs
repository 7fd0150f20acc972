//! HTTP dispatcher for OpenAI-compatible chat endpoints

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use draftpilot_config::AssistantConfig;
use draftpilot_surface::CURSOR_SENTINEL;

use crate::error::{DispatchError, Result};
use crate::protocol::{
    ChatExchange, CompletionRequest, CompletionResponse, ImageRequest, ImageResponse, Role,
    TalkRequest, TalkResponse,
};
use crate::CompletionDispatcher;

/// Placeholder in image prompt templates replaced with the paragraph text
const PARAGRAPH_PLACEHOLDER: &str = "[TextOfParagraph]";

/// Placeholder in talk prompts replaced with the selected text
const SELECTION_PLACEHOLDER: &str = "[SELECTED_TEXT]";

const COMPLETION_MAX_TOKENS: u32 = 150;
const COMPLETION_TEMPERATURE: f32 = 0.3;
const TALK_MAX_TOKENS: u32 = 1000;
const TALK_TEMPERATURE: f32 = 0.7;
const IMAGE_MAX_TOKENS: u32 = 100;
const IMAGE_TEMPERATURE: f32 = 0.7;

const IMAGE_SYSTEM_PROMPT: &str = "You are a creative assistant that generates concise, \
     vivid descriptions for images based on text content.";

/// Dispatcher that calls an OpenAI-compatible chat endpoint directly
///
/// Every operation is a single non-streaming chat call with bearer auth.
/// There is no retry and no deadline beyond the HTTP client's own defaults;
/// overtaken responses are suppressed upstream by request identifier.
pub struct HttpDispatcher {
    client: Client,
}

impl HttpDispatcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. with a proxy or timeout
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn chat(
        &self,
        config: &AssistantConfig,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
        temperature: f32,
        stop: Vec<String>,
    ) -> Result<String> {
        if !config.has_api_key() {
            return Err(DispatchError::MissingApiKey);
        }

        let payload = ChatPayload {
            model: config.model.clone(),
            messages,
            max_tokens,
            temperature,
            stop,
            stream: false,
        };

        debug!(model = %config.model, endpoint = %config.api_url, "sending chat request");

        let response = self
            .client
            .post(&config.api_url)
            .bearer_auth(config.api_key.trim())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(DispatchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatCompletionBody = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| DispatchError::MalformedResponse("missing choices data".to_string()))
    }
}

impl Default for HttpDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionDispatcher for HttpDispatcher {
    async fn complete(&self, request: CompletionRequest) -> CompletionResponse {
        let messages = vec![
            ChatMessage::system(&request.config.prompt),
            ChatMessage::user(&request.context),
        ];
        let stop = vec!["\n\n".to_string(), CURSOR_SENTINEL.to_string()];

        match self
            .chat(
                &request.config,
                messages,
                COMPLETION_MAX_TOKENS,
                COMPLETION_TEMPERATURE,
                stop,
            )
            .await
        {
            Ok(content) => CompletionResponse::ok(request.request_id, content),
            Err(err) => {
                error!(request_id = request.request_id, %err, "completion request failed");
                CompletionResponse::failed(request.request_id, &err)
            }
        }
    }

    async fn talk(&self, request: TalkRequest) -> TalkResponse {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        if request.prompt.contains(SELECTION_PLACEHOLDER) {
            let system = request
                .prompt
                .replace(SELECTION_PLACEHOLDER, &request.selected_text);
            messages.push(ChatMessage::system(&system));
        } else {
            messages.push(ChatMessage::system(&request.prompt));
            messages.push(ChatMessage::user(&request.selected_text));
        }
        for exchange in &request.history {
            messages.push(ChatMessage::from_exchange(exchange));
        }

        match self
            .chat(
                &request.config,
                messages,
                TALK_MAX_TOKENS,
                TALK_TEMPERATURE,
                Vec::new(),
            )
            .await
        {
            Ok(content) => TalkResponse::ok(request.request_id, content),
            Err(err) => {
                error!(request_id = request.request_id, %err, "talk request failed");
                TalkResponse::failed(request.request_id, &err)
            }
        }
    }

    async fn describe_image(&self, request: ImageRequest) -> ImageResponse {
        let prompt = request
            .config
            .image_prompt
            .replace(PARAGRAPH_PLACEHOLDER, &request.paragraph_text);
        let messages = vec![
            ChatMessage::system(IMAGE_SYSTEM_PROMPT),
            ChatMessage::user(&prompt),
        ];

        match self
            .chat(
                &request.config,
                messages,
                IMAGE_MAX_TOKENS,
                IMAGE_TEMPERATURE,
                Vec::new(),
            )
            .await
        {
            Ok(content) => ImageResponse::ok(request.request_id, content.trim()),
            Err(err) => {
                error!(request_id = request.request_id, %err, "image request failed");
                ImageResponse::failed(request.request_id, &err)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatPayload {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system",
            content: content.to_string(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user",
            content: content.to_string(),
        }
    }

    fn from_exchange(exchange: &ChatExchange) -> Self {
        let role = match exchange.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: exchange.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}
