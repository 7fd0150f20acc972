//! DraftPilot Remote Dispatcher
//!
//! The seam between the completion core and whatever privileged process
//! performs the actual network call. The core builds a request, hands it to
//! a [`CompletionDispatcher`], and pairs the eventual response back by
//! request identifier; it never issues HTTP itself.
//!
//! [`HttpDispatcher`] is the built-in relay for OpenAI-compatible chat
//! endpoints. Hosts with their own privileged messaging layer implement the
//! trait instead.

pub mod error;
pub mod http;
pub mod protocol;

use async_trait::async_trait;

pub use error::{DispatchError, Result};
pub use http::HttpDispatcher;
pub use protocol::{
    ChatExchange, CompletionRequest, CompletionResponse, ImageRequest, ImageResponse, Role,
    TalkRequest, TalkResponse,
};

/// Privileged relay performing AI calls on the core's behalf
///
/// Implementations must always echo the identifier of the request they were
/// given, including on failure, so the orchestrator can discard overtaken
/// responses. Failures are reported inside the response rather than as
/// transport errors; the orchestrator treats them all as terminal.
#[async_trait]
pub trait CompletionDispatcher: Send + Sync {
    /// Request an inline completion for a cursor context
    async fn complete(&self, request: CompletionRequest) -> CompletionResponse;

    /// Run a conversational talk tool over selected text
    async fn talk(&self, request: TalkRequest) -> TalkResponse;

    /// Request an image description for a paragraph
    async fn describe_image(&self, request: ImageRequest) -> ImageResponse;
}
