//! Configuration loader and credential resolution.
//!
//! Reads `config.toml` and deserializes it into [`AppConfig`]. Falls back
//! to the Fuzzy Friends defaults when the file is missing or malformed.
//!
//! Credential resolution happens once at startup, before the conversation
//! loop is entered: both API keys must come from the secret store, and the
//! Azure endpoint must come from the config file or the environment. A
//! missing credential aborts startup with a [`ConfigError`].

use std::path::Path;

use secrecy::SecretString;

use ewogchat_core::secret::SecretStore;
use ewogchat_types::config::AppConfig;
use ewogchat_types::error::ConfigError;

/// Environment variable holding the Azure OpenAI deployment API key.
pub const OPENAI_API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
/// Environment variable holding the Azure AI Search API key.
pub const SEARCH_API_KEY_VAR: &str = "AZURE_AISEARCH_API_KEY";
/// Environment variable fallback for the Azure OpenAI endpoint.
pub const OPENAI_ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";

/// Load application configuration from a `config.toml` path.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_app_config(config_path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Fully resolved startup configuration: the parsed [`AppConfig`] plus the
/// credentials and endpoint that must be present before the loop starts.
///
/// `Debug` is safe here: `SecretString` redacts its value.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: AppConfig,
    pub endpoint: String,
    pub api_key: SecretString,
    pub search_api_key: SecretString,
}

/// Resolve credentials and the endpoint against a secret store.
///
/// The endpoint comes from `config.endpoint` when set, otherwise from the
/// `AZURE_OPENAI_ENDPOINT` environment variable. Both API keys are
/// mandatory; a missing one fails with the variable name in the message.
pub async fn resolve_credentials<S: SecretStore>(
    config: AppConfig,
    secrets: &S,
) -> Result<ResolvedConfig, ConfigError> {
    let api_key = require_secret(secrets, OPENAI_API_KEY_VAR).await?;
    let search_api_key = require_secret(secrets, SEARCH_API_KEY_VAR).await?;

    let endpoint = match config.endpoint.clone() {
        Some(endpoint) => endpoint,
        None => secrets
            .get(OPENAI_ENDPOINT_VAR)
            .await
            .ok()
            .flatten()
            .ok_or(ConfigError::MissingEndpoint)?,
    };

    Ok(ResolvedConfig {
        config,
        endpoint,
        api_key: SecretString::from(api_key),
        search_api_key: SecretString::from(search_api_key),
    })
}

async fn require_secret<S: SecretStore>(secrets: &S, key: &str) -> Result<String, ConfigError> {
    match secrets.get(key).await {
        Ok(Some(value)) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use ewogchat_types::error::SecretError;
    use tempfile::TempDir;

    /// In-memory secret store for resolution tests.
    struct MapSecretStore(HashMap<String, String>);

    impl SecretStore for MapSecretStore {
        async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
            Ok(self.0.get(key).cloned())
        }
    }

    fn full_store() -> MapSecretStore {
        let mut map = HashMap::new();
        map.insert(OPENAI_API_KEY_VAR.to_string(), "openai-key".to_string());
        map.insert(SEARCH_API_KEY_VAR.to_string(), "search-key".to_string());
        map.insert(
            OPENAI_ENDPOINT_VAR.to_string(),
            "https://env.openai.azure.com".to_string(),
        );
        MapSecretStore(map)
    }

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(&tmp.path().join("config.toml")).await;
        assert!(config.endpoint.is_none());
        assert!(config.streaming);
        assert_eq!(config.params.max_tokens, 2000);
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
endpoint = "https://myres.openai.azure.com"
deployment = "gpt4o"
streaming = false

[search]
index_name = "other-index"
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(&config_path).await;
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://myres.openai.azure.com")
        );
        assert_eq!(config.deployment, "gpt4o");
        assert!(!config.streaming);
        assert_eq!(config.search.index_name, "other-index");
        // Unset sections keep defaults.
        assert_eq!(config.search.endpoint, "https://sckw.search.windows.net");
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(&config_path).await;
        assert!(config.endpoint.is_none());
        assert_eq!(config.deployment, "chat");
    }

    #[tokio::test]
    async fn resolve_credentials_happy_path() {
        let resolved = resolve_credentials(AppConfig::default(), &full_store())
            .await
            .unwrap();
        assert_eq!(resolved.endpoint, "https://env.openai.azure.com");
    }

    #[tokio::test]
    async fn resolve_credentials_config_endpoint_wins_over_env() {
        let config = AppConfig {
            endpoint: Some("https://file.openai.azure.com".to_string()),
            ..AppConfig::default()
        };
        let resolved = resolve_credentials(config, &full_store()).await.unwrap();
        assert_eq!(resolved.endpoint, "https://file.openai.azure.com");
    }

    #[tokio::test]
    async fn resolve_credentials_missing_openai_key_fails() {
        let mut store = full_store();
        store.0.remove(OPENAI_API_KEY_VAR);

        let err = resolve_credentials(AppConfig::default(), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(ref k) if k == OPENAI_API_KEY_VAR));
    }

    #[tokio::test]
    async fn resolve_credentials_missing_search_key_fails() {
        let mut store = full_store();
        store.0.remove(SEARCH_API_KEY_VAR);

        let err = resolve_credentials(AppConfig::default(), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(ref k) if k == SEARCH_API_KEY_VAR));
    }

    #[tokio::test]
    async fn resolve_credentials_missing_endpoint_fails() {
        let mut store = full_store();
        store.0.remove(OPENAI_ENDPOINT_VAR);

        let err = resolve_credentials(AppConfig::default(), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEndpoint));
    }

    #[tokio::test]
    async fn resolve_credentials_empty_key_is_missing() {
        let mut store = full_store();
        store
            .0
            .insert(OPENAI_API_KEY_VAR.to_string(), String::new());

        let err = resolve_credentials(AppConfig::default(), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }
}
