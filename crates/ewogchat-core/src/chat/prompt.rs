//! Request rendering: transcript + user input -> CompletionRequest.
//!
//! The original prompt was an interpolated template of chat history and
//! user input. Here the substitution contract is an explicit function:
//! the rendered request carries the system preamble, then the transcript
//! snapshot in order, then the current user input as the final message.

use ewogchat_types::chat::Transcript;
use ewogchat_types::config::ExecutionParams;
use ewogchat_types::llm::{CompletionRequest, Message};

/// Fixed system preamble sent with every request.
///
/// The retrieval index supplies product knowledge; the preamble only pins
/// the assistant's role and tone.
pub const SYSTEM_PREAMBLE: &str = "You are the customer service assistant for \
Fuzzy Friends of Endor, a shop that loves and sells live Ewogs. Answer \
courteously and helpfully, grounded in the store's product documentation.";

/// Render a turn request from the transcript and the current user input.
///
/// Substitution contract:
/// 1. `system` is the fixed preamble, verbatim.
/// 2. `messages` is the full transcript snapshot in chronological order,
///    followed by exactly one user message holding `user_input`.
/// 3. Sampling fields are copied from the fixed [`ExecutionParams`].
///
/// The returned value is transient; it is never retained after the call.
pub fn render(
    preamble: &str,
    transcript: &Transcript,
    user_input: &str,
    params: &ExecutionParams,
    stream: bool,
) -> CompletionRequest {
    let mut messages: Vec<Message> = transcript.messages().to_vec();
    messages.push(Message::user(user_input));

    CompletionRequest {
        messages,
        system: Some(preamble.to_string()),
        max_tokens: params.max_tokens,
        temperature: Some(params.temperature),
        top_p: Some(params.top_p),
        stream,
    }
}
