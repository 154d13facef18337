//! AzureOpenAiProvider -- concrete [`ChatProvider`] for an Azure OpenAI
//! chat deployment with Azure AI Search retrieval grounding.
//!
//! Sends requests to
//! `{endpoint}/openai/deployments/{deployment}/chat/completions` with the
//! `api-key` header and an `api-version` query parameter. Supports both
//! non-streaming (`complete`) and streaming (`stream`) modes. The search
//! index handle is attached to every request as a `data_sources` entry;
//! retrieval results are never inspected locally.
//!
//! API keys are wrapped in [`secrecy::SecretString`] and are never logged
//! or included in `Debug` output.

pub mod streaming;
pub mod types;

use std::pin::Pin;
use std::time::Duration;

use futures_util::Stream;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use ewogchat_core::llm::provider::ChatProvider;
use ewogchat_types::config::SearchSettings;
use ewogchat_types::llm::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, StreamEvent, Usage,
};

use self::streaming::create_azure_stream;
use self::types::{
    AzureChatRequest, AzureChatResponse, AzureMessage, AzureSearchParameters, DataSource,
    SearchAuthentication,
};

/// Configuration for constructing an [`AzureOpenAiProvider`].
pub struct AzureOpenAiConfig {
    /// Azure OpenAI resource endpoint, e.g. "https://myres.openai.azure.com".
    pub endpoint: String,
    /// Chat deployment name.
    pub deployment: String,
    /// API version query parameter.
    pub api_version: String,
    /// Deployment API key.
    pub api_key: SecretString,
    /// Retrieval index handle attached to every request.
    pub search: SearchSettings,
    /// API key for the search service.
    pub search_api_key: SecretString,
}

/// Azure OpenAI chat-completion provider.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API keys.
/// The `SecretString` fields are only exposed when constructing request
/// headers and the search authentication block.
pub struct AzureOpenAiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    deployment: String,
    api_version: String,
    search: SearchSettings,
    search_api_key: SecretString,
}

impl AzureOpenAiProvider {
    /// Create a new Azure provider.
    pub fn new(config: AzureOpenAiConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min ceiling for long generations
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            deployment: config.deployment,
            api_version: config.api_version,
            search: config.search,
            search_api_key: config.search_api_key,
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build the full chat completions URL for this deployment.
    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.base_url, self.deployment, self.api_version
        )
    }

    /// Convert a generic [`CompletionRequest`] into an [`AzureChatRequest`].
    ///
    /// The system preamble becomes the leading `system` message; the
    /// configured search index is attached as the sole data source.
    fn to_azure_request(&self, request: &CompletionRequest, stream: bool) -> AzureChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref system) = request.system {
            messages.push(AzureMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(AzureMessage {
                role: msg.role.to_string(),
                content: msg.content.clone(),
            });
        }

        AzureChatRequest {
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            stream,
            data_sources: vec![DataSource::AzureSearch {
                parameters: AzureSearchParameters {
                    endpoint: self.search.endpoint.clone(),
                    index_name: self.search.index_name.clone(),
                    authentication: SearchAuthentication::ApiKey {
                        key: self.search_api_key.expose_secret().to_string(),
                    },
                },
            }],
        }
    }
}

// AzureOpenAiProvider intentionally does NOT derive Debug: the reqwest
// client and SecretString fields must never reach logs or panic output.

impl ChatProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure_openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_azure_request(request, false);

        let response = self
            .client
            .post(self.url())
            .header("api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, error_body));
        }

        let azure_resp: AzureChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let first = azure_resp.choices.first();
        let content = first
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();
        let finish_reason = first
            .and_then(|c| c.finish_reason.as_deref())
            .and_then(|r| r.parse::<FinishReason>().ok())
            .unwrap_or(FinishReason::Stop);
        let usage = azure_resp
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: azure_resp.id,
            content,
            model: azure_resp.model,
            finish_reason,
            usage,
        })
    }

    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        let body = self.to_azure_request(&request, true);
        create_azure_stream(&self.client, &self.url(), body, &self.api_key)
    }
}

/// Map a non-success HTTP status to an [`LlmError`].
pub(crate) fn map_error_status(status: StatusCode, error_body: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited,
        400 => LlmError::InvalidRequest(error_body),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {error_body}"),
        },
    }
}
