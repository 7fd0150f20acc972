//! Wire types exchanged with the dispatcher
//!
//! These mirror the host messaging shapes: camelCase fields, success flag
//! plus optional payload/error, and a request identifier echoed verbatim so
//! the orchestrator can drop overtaken responses.

use serde::{Deserialize, Serialize};

use draftpilot_config::AssistantConfig;

use crate::error::DispatchError;

/// Inline completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Monotonic identifier, one per completion attempt
    pub request_id: u64,
    /// Configuration snapshot at issue time
    pub config: AssistantConfig,
    /// `before<CURSOR>after` context window
    pub context: String,
}

/// Inline completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub success: bool,
    pub request_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompletionResponse {
    pub fn ok(request_id: u64, completion: impl Into<String>) -> Self {
        Self {
            success: true,
            request_id,
            completion: Some(completion.into()),
            error: None,
        }
    }

    pub fn failed(request_id: u64, error: &DispatchError) -> Self {
        Self {
            success: false,
            request_id,
            completion: None,
            error: Some(error.to_string()),
        }
    }
}

/// Speaker role in a talk-tool conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior exchange in a talk-tool conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch, as the host records it
    pub timestamp: i64,
}

/// Conversational talk-tool request over selected text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkRequest {
    pub request_id: u64,
    pub config: AssistantConfig,
    pub selected_text: String,
    /// The invoked tool's system prompt
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<ChatExchange>,
}

/// Talk-tool response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkResponse {
    pub success: bool,
    pub request_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TalkResponse {
    pub fn ok(request_id: u64, response: impl Into<String>) -> Self {
        Self {
            success: true,
            request_id,
            response: Some(response.into()),
            error: None,
        }
    }

    pub fn failed(request_id: u64, error: &DispatchError) -> Self {
        Self {
            success: false,
            request_id,
            response: None,
            error: Some(error.to_string()),
        }
    }
}

/// Image description request for a paragraph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub request_id: u64,
    pub config: AssistantConfig,
    pub paragraph_text: String,
}

/// Image description response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub success: bool,
    pub request_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageResponse {
    pub fn ok(request_id: u64, description: impl Into<String>) -> Self {
        Self {
            success: true,
            request_id,
            image_description: Some(description.into()),
            error: None,
        }
    }

    pub fn failed(request_id: u64, error: &DispatchError) -> Self {
        Self {
            success: false,
            request_id,
            image_description: None,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_response_serializes_camel_case() {
        let json = serde_json::to_value(CompletionResponse::ok(7, "next words")).unwrap();
        assert_eq!(json["requestId"], 7);
        assert_eq!(json["success"], true);
        assert_eq!(json["completion"], "next words");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failed_response_carries_error_string() {
        let err = DispatchError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        let response = CompletionResponse::failed(3, &err);
        assert!(!response.success);
        assert_eq!(response.request_id, 3);
        assert!(response.error.unwrap().contains("500"));
    }

    #[test]
    fn talk_request_history_defaults_empty() {
        let json = r#"{
            "requestId": 1,
            "config": {"urls": [], "apiUrl": "u", "apiKey": "k", "model": "m",
                       "waitTime": 1, "prompt": "p"},
            "selectedText": "hello",
            "prompt": "rewrite"
        }"#;
        let request: TalkRequest = serde_json::from_str(json).unwrap();
        assert!(request.history.is_empty());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
