//! SSE stream creation for the Azure chat completions endpoint.
//!
//! Protocol:
//! 1. `POST` the request with `stream: true`; a non-2xx status fails the
//!    stream before any event is emitted.
//! 2. Each SSE `data:` line carries one `chat.completion.chunk` JSON
//!    object; text arrives in `choices[].delta.content`.
//! 3. A chunk may carry an `error` object mid-stream.
//! 4. The literal `[DONE]` sentinel closes the sequence.
//!
//! Fragment order is preserved exactly as received; the adapter inserts
//! nothing between deltas.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use secrecy::{ExposeSecret, SecretString};

use ewogchat_types::llm::{FinishReason, LlmError, StreamEvent};

use super::map_error_status;
use super::types::{AzureChatRequest, AzureStreamChunk};

/// Create a streaming SSE connection to an Azure chat deployment.
///
/// Returns a `Stream` of [`StreamEvent`]s: `Connected` once the response
/// status is accepted, then `TextDelta`s in arrival order, a
/// `FinishDelta` when the service reports its finish reason, and `Done`
/// after the `[DONE]` sentinel.
pub fn create_azure_stream(
    client: &reqwest::Client,
    url: &str,
    body: AzureChatRequest,
    api_key: &SecretString,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
    let client = client.clone();
    let url = url.to_string();
    let api_key = api_key.clone();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .header("api-key", api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let response = check_status(response).await?;

        yield StreamEvent::Connected;

        let mut events = response.bytes_stream().eventsource();

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| LlmError::Stream(e.to_string()))?;

            if event.data == "[DONE]" {
                break;
            }

            let chunk: AzureStreamChunk =
                serde_json::from_str(&event.data).map_err(|e| {
                    LlmError::Deserialization(format!("failed to parse chunk: {e}"))
                })?;

            for stream_event in chunk_events(chunk)? {
                yield stream_event;
            }
        }

        yield StreamEvent::Done;
    })
}

/// Pass a successful response through; consume a failed one into an error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let error_body = response.text().await.unwrap_or_default();
        Err(map_error_status(status, error_body))
    }
}

/// Translate one parsed chunk into stream events.
///
/// A chunk carrying an `error` object fails the stream; otherwise each
/// choice contributes a `TextDelta` for non-empty content and a
/// `FinishDelta` once the service reports a finish reason (unknown
/// reasons default to `Stop`).
fn chunk_events(chunk: AzureStreamChunk) -> Result<Vec<StreamEvent>, LlmError> {
    if let Some(error) = chunk.error {
        return Err(LlmError::Provider {
            message: error.message,
        });
    }

    let mut events = Vec::new();
    for choice in &chunk.choices {
        if let Some(text) = choice.delta.as_ref().and_then(|d| d.content.clone()) {
            if !text.is_empty() {
                events.push(StreamEvent::TextDelta { text });
            }
        }

        if let Some(reason) = choice.finish_reason.as_deref() {
            let finish_reason = reason.parse::<FinishReason>().unwrap_or(FinishReason::Stop);
            events.push(StreamEvent::FinishDelta { finish_reason });
        }
    }
    Ok(events)
}
