//! Configuration types for ewogchat.
//!
//! `AppConfig` represents the optional `config.toml` controlling the Azure
//! OpenAI deployment, the retrieval index, and the execution parameters.
//! All fields have defaults matching the Fuzzy Friends deployment; API keys
//! never appear here, they come from the environment at startup.

use serde::{Deserialize, Serialize};

/// Default assistant greeting that seeds every transcript.
pub const DEFAULT_GREETING: &str = "Hi there, I'm the Fuzzy Friends of Endor \
customer service assistant. We love and sell live Ewogs. I'm curteous and helpful.";

/// Fixed per-request sampling parameters, set once at startup and reused
/// unmodified for every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.8
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// Handle for the pre-indexed retrieval source attached to every request.
///
/// The index is forwarded as-is; retrieval results are never inspected or
/// transformed locally. The API key is resolved separately from the
/// environment and is not part of this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Search service endpoint URL.
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// Name of the pre-built index.
    #[serde(default = "default_index_name")]
    pub index_name: String,
}

fn default_search_endpoint() -> String {
    "https://sckw.search.windows.net".to_string()
}

fn default_index_name() -> String {
    "ewog-index".to_string()
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            index_name: default_index_name(),
        }
    }
}

/// Top-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Azure OpenAI resource endpoint (e.g. "https://myres.openai.azure.com").
    /// Falls back to the AZURE_OPENAI_ENDPOINT environment variable.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Chat deployment name.
    #[serde(default = "default_deployment")]
    pub deployment: String,

    /// API version query parameter for the chat completions call.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Whether responses stream incrementally (true) or arrive whole (false).
    #[serde(default = "default_streaming")]
    pub streaming: bool,

    /// Assistant greeting that seeds the transcript.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub params: ExecutionParams,
}

fn default_deployment() -> String {
    "chat".to_string()
}

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_streaming() -> bool {
    true
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            deployment: default_deployment(),
            api_version: default_api_version(),
            streaming: default_streaming(),
            greeting: default_greeting(),
            search: SearchSettings::default(),
            params: ExecutionParams::default(),
        }
    }
}
