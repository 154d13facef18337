//! ChatProvider trait definition.
//!
//! This is the seam between the conversation loop and the external
//! chat-completion service. Uses RPITIT for `complete` and
//! `Pin<Box<dyn Stream>>` for `stream` (streams need to be object-safe
//! for the BoxChatProvider wrapper).

use std::pin::Pin;

use futures_util::Stream;

use ewogchat_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};

/// Trait for chat-completion service backends.
///
/// Implementations live in ewogchat-infra (e.g. `AzureOpenAiProvider`);
/// tests use in-memory mocks. A streaming response is a lazy, finite,
/// non-restartable sequence of events that must be consumed to completion
/// or dropped before the next request is issued.
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g. "azure_openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Returns a boxed stream (not RPITIT) because streams need to be
    /// object-safe for the `BoxChatProvider` wrapper.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;
}
