//! Turn engine: the conversation loop's dispatch and bookkeeping.
//!
//! One turn = append the user message, send the rendered request through
//! the provider, reassemble the reply, append it as an assistant message.
//! Turns are strictly sequential; the engine holds no state besides the
//! provider, the fixed parameters, and the preamble, so the transcript is
//! the only thing a turn mutates.

use futures_util::StreamExt;
use tracing::{Instrument, info_span};

use ewogchat_types::chat::Transcript;
use ewogchat_types::config::ExecutionParams;
use ewogchat_types::llm::{CompletionRequest, LlmError, StreamEvent};

use crate::llm::box_provider::BoxChatProvider;

use super::prompt;

/// Executes conversation turns against a chat-completion provider.
pub struct ChatEngine {
    provider: BoxChatProvider,
    params: ExecutionParams,
    preamble: String,
}

impl ChatEngine {
    /// Create an engine with the given provider and fixed parameters.
    pub fn new(provider: BoxChatProvider, params: ExecutionParams) -> Self {
        Self {
            provider,
            params,
            preamble: prompt::SYSTEM_PREAMBLE.to_string(),
        }
    }

    /// Override the system preamble (used by tests and custom configs).
    pub fn with_preamble(mut self, preamble: String) -> Self {
        self.preamble = preamble;
        self
    }

    /// Render the request for the current turn without dispatching it.
    pub fn render(&self, transcript: &Transcript, user_input: &str, stream: bool) -> CompletionRequest {
        prompt::render(&self.preamble, transcript, user_input, &self.params, stream)
    }

    /// Run one non-streaming turn.
    ///
    /// Appends the user message, dispatches, and on success appends the
    /// assistant reply and returns it. On failure the transcript keeps the
    /// user message and gains no assistant message; the error is returned
    /// for the caller to report.
    pub async fn run_turn(
        &self,
        transcript: &mut Transcript,
        user_input: &str,
    ) -> Result<String, LlmError> {
        let request = self.render(transcript, user_input, false);
        transcript.push_user(user_input);

        let span = info_span!(
            "chat.complete",
            provider = self.provider.name(),
            max_tokens = request.max_tokens,
            stream = false,
        );
        let response = self.provider.complete(&request).instrument(span).await?;

        transcript.push_assistant(response.content.clone());
        Ok(response.content)
    }

    /// Run one streaming turn.
    ///
    /// `on_fragment` is called once per text fragment, in arrival order,
    /// with no separators inserted; the fragments are concatenated into the
    /// assistant message appended at the end of the turn.
    ///
    /// If the stream fails after some fragments were already delivered, the
    /// partial text is discarded: the transcript keeps the user message and
    /// gains no assistant message for this turn.
    pub async fn run_turn_streaming(
        &self,
        transcript: &mut Transcript,
        user_input: &str,
        mut on_fragment: impl FnMut(&str),
    ) -> Result<String, LlmError> {
        let request = self.render(transcript, user_input, true);
        transcript.push_user(user_input);

        let span = info_span!(
            "chat.stream",
            provider = self.provider.name(),
            max_tokens = request.max_tokens,
            stream = true,
        );

        let result = async {
            let mut stream = self.provider.stream(request);
            let mut assembled = String::new();

            // Consume to completion; a turn never abandons a live stream.
            while let Some(event) = stream.next().await {
                match event? {
                    StreamEvent::TextDelta { text } => {
                        on_fragment(&text);
                        assembled.push_str(&text);
                    }
                    StreamEvent::Done => break,
                    StreamEvent::Connected | StreamEvent::FinishDelta { .. } => {}
                }
            }

            Ok::<String, LlmError>(assembled)
        }
        .instrument(span)
        .await?;

        transcript.push_assistant(result.clone());
        Ok(result)
    }
}
