//! Azure OpenAI chat completions wire types.
//!
//! These are Azure-specific request/response structures used for HTTP
//! communication with a chat deployment, including the `data_sources`
//! extension that attaches an Azure AI Search index as retrieval
//! grounding. They are NOT the generic types from ewogchat-types -- those
//! are provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for `POST .../chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct AzureChatRequest {
    pub messages: Vec<AzureMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    pub stream: bool,
    /// Retrieval grounding sources ("On Your Data"). Skipped when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_sources: Vec<DataSource>,
}

/// A single message in an Azure conversation.
#[derive(Debug, Clone, Serialize)]
pub struct AzureMessage {
    pub role: String,
    pub content: String,
}

/// One entry in the `data_sources` array.
///
/// Only the `azure_search` source type is used; the index is forwarded
/// as configured and its results are never inspected locally.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataSource {
    AzureSearch { parameters: AzureSearchParameters },
}

/// Connection parameters for an Azure AI Search data source.
#[derive(Debug, Clone, Serialize)]
pub struct AzureSearchParameters {
    pub endpoint: String,
    pub index_name: String,
    pub authentication: SearchAuthentication,
}

/// Authentication block for the search data source.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchAuthentication {
    ApiKey { key: String },
}

// ---------------------------------------------------------------------------
// Response payloads
//
// The streaming protocol is SSE: each `data:` field carries one
// `chat.completion.chunk` JSON object, and the sequence is closed by the
// literal sentinel `[DONE]`. Unknown fields (content filter results, the
// retrieval `context` block) are ignored by deserialization.
// ---------------------------------------------------------------------------

/// Non-streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureChatResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<AzureChoice>,
    #[serde(default)]
    pub usage: Option<AzureUsage>,
}

/// One choice in a non-streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureChoice {
    pub message: AzureResponseMessage,
    pub finish_reason: Option<String>,
}

/// The message object inside a non-streaming choice.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AzureUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// One SSE chunk of a streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureStreamChunk {
    /// The first chunk Azure sends may carry only prompt filter results
    /// and an empty choices array.
    #[serde(default)]
    pub choices: Vec<AzureStreamChoice>,
    /// Mid-stream API errors arrive as a JSON object on the data line.
    #[serde(default)]
    pub error: Option<AzureError>,
}

/// One choice inside a streaming chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureStreamChoice {
    #[serde(default)]
    pub delta: Option<AzureDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental content delta inside a streaming choice.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// An error object from the Azure API.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}
