use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::faq::{default_faq, FaqEntry};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub remote: RemoteQaConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    /// FAQ corpus, in match order.
    #[serde(default = "default_faq")]
    pub faq: Vec<FaqEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            remote: RemoteQaConfig::default(),
            resolver: ResolverConfig::default(),
            cors: CorsConfig::default(),
            faq: default_faq(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5000
}

/// Remote question-answering endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteQaConfig {
    /// Inference API base URL; the model id is appended as the last path segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model id, echoed by `/health`.
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer token. Without it remote QA is disabled and only exact FAQ matches answer.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Per-request timeout in seconds (default: 60)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Attempts per query, loading waits included (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Upper bound on a single "model is loading" wait, in seconds (default: 30)
    #[serde(default = "default_max_loading_wait")]
    pub max_loading_wait_secs: f64,
    /// Fixed wait after a transport or parse failure, in seconds (default: 2)
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: f64,
}

impl RemoteQaConfig {
    /// The credential, if set and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Default for RemoteQaConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_token: None,
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            max_loading_wait_secs: default_max_loading_wait(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

fn default_api_base() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_model() -> String {
    "deepset/roberta-base-squad2".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_max_loading_wait() -> f64 {
    30.0
}

fn default_retry_delay() -> f64 {
    2.0
}

/// Answer resolution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Minimum remote score for an answer to be accepted (default: 0.3)
    #[serde(default = "default_threshold")]
    pub confidence_threshold: f64,
    /// Returned when neither the FAQ nor the remote endpoint produce an answer.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_threshold(),
            fallback_message: default_fallback_message(),
        }
    }
}

fn default_threshold() -> f64 {
    0.3
}

pub fn default_fallback_message() -> String {
    "Sorry, I don't have an answer for that. Please contact support.".to_string()
}

/// Cross-origin configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub remote: SanitizedRemoteQaConfig,
    pub resolver: ResolverConfig,
    pub cors: CorsConfig,
    pub faq_entries: usize,
}

/// Sanitized remote config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRemoteQaConfig {
    pub api_base: String,
    pub model: String,
    pub api_token_configured: bool,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub max_loading_wait_secs: f64,
    pub retry_delay_secs: f64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let remote = &config.remote;
        Self {
            server: config.server.clone(),
            remote: SanitizedRemoteQaConfig {
                api_base: remote.api_base.clone(),
                model: remote.model.clone(),
                api_token_configured: remote.token().is_some(),
                timeout_secs: remote.timeout_secs,
                max_attempts: remote.max_attempts,
                max_loading_wait_secs: remote.max_loading_wait_secs,
                retry_delay_secs: remote.retry_delay_secs,
            },
            resolver: config.resolver.clone(),
            cors: config.cors.clone(),
            faq_entries: config.faq.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.remote.model, "deepset/roberta-base-squad2");
        assert_eq!(config.remote.timeout_secs, 60);
        assert_eq!(config.remote.max_attempts, 3);
        assert_eq!(config.remote.max_loading_wait_secs, 30.0);
        assert_eq!(config.remote.retry_delay_secs, 2.0);
        assert!(config.remote.api_token.is_none());
        assert_eq!(config.resolver.confidence_threshold, 0.3);
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.faq.len(), 3);
    }

    #[test]
    fn test_deserialize_custom_faq_replaces_builtin() {
        let toml = r#"
[[faq]]
question = "Where are you?"
answer = "In the cloud."
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.faq.len(), 1);
        assert_eq!(config.faq[0].question, "Where are you?");
        assert_eq!(config.faq[0].answer, "In the cloud.");
    }

    #[test]
    fn test_deserialize_remote_section() {
        let toml = r#"
[remote]
model = "distilbert-base-cased-distilled-squad"
api_token = "hf_secret"
timeout_secs = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.remote.model, "distilbert-base-cased-distilled-squad");
        assert_eq!(config.remote.token(), Some("hf_secret"));
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.remote.max_attempts, 3); // default
    }

    #[test]
    fn test_blank_token_is_not_a_credential() {
        let remote = RemoteQaConfig {
            api_token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(remote.token().is_none());
    }

    #[test]
    fn test_sanitized_config_hides_token() {
        let mut config = Config::default();
        config.remote.api_token = Some("hf_secret".to_string());

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.remote.api_token_configured);
        assert_eq!(sanitized.faq_entries, 3);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("hf_secret"));
    }

    #[test]
    fn test_sanitized_config_without_token() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(!sanitized.remote.api_token_configured);
        assert_eq!(sanitized.server.port, 5000);
    }
}
