//! TOML-based configuration for Scout
//!
//! Providers, connectors, pipeline limits and prompt overrides are declared in
//! a TOML file (`scout.toml`). Secrets never live in the file: it names the
//! environment variables that hold them.

use crate::prompts::Prompts;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Root configuration structure loaded from scout.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub connectors: ConnectorsConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Instruction overrides
    #[serde(default)]
    pub prompts: Prompts,
}

// ============= LLM Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenAI,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    /// Overrides the provider's default endpoint
    #[serde(default)]
    pub api_base: Option<String>,

    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier used for every completion call
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_provider() -> ProviderKind {
    ProviderKind::Gemini
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_base: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

// ============= Connector Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorsConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default)]
    pub browser: BrowserConnectorConfig,

    #[serde(default)]
    pub structured_api: StructuredApiConfig,

    #[serde(default)]
    pub html: HtmlScrapeConfig,

    #[serde(default)]
    pub dork: DorkConfig,
}

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_limit() -> usize {
    5
}

fn default_true() -> bool {
    true
}

impl Default for ConnectorsConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            default_limit: default_limit(),
            browser: BrowserConnectorConfig::default(),
            structured_api: StructuredApiConfig::default(),
            html: HtmlScrapeConfig::default(),
            dork: DorkConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConnectorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_browser_base")]
    pub base_url: String,

    /// Wait after each scroll for lazy-loaded cards
    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,

    /// Wall-clock budget for the whole browser session
    #[serde(default = "default_browser_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_true")]
    pub headless: bool,
}

fn default_browser_base() -> String {
    "https://www.ycombinator.com".to_string()
}

fn default_scroll_delay_ms() -> u64 {
    2000
}

fn default_browser_timeout() -> u64 {
    120
}

impl Default for BrowserConnectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_browser_base(),
            scroll_delay_ms: default_scroll_delay_ms(),
            timeout_secs: default_browser_timeout(),
            headless: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_graphql_url")]
    pub api_url: String,

    /// Environment variable containing the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_graphql_url() -> String {
    "https://api.producthunt.com/v2/api/graphql".to_string()
}

fn default_token_env() -> String {
    "PH_API_TOKEN".to_string()
}

impl Default for StructuredApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_graphql_url(),
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlScrapeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_html_base")]
    pub base_url: String,
}

fn default_html_base() -> String {
    "https://devpost.com".to_string()
}

impl Default for HtmlScrapeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_html_base(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DorkConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for DorkConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ============= Pipeline Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Per-source limit when the model does not supply one
    #[serde(default = "default_web_intel_limit")]
    pub web_intel_limit: usize,
}

fn default_web_intel_limit() -> usize {
    6
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            web_intel_limit: default_web_intel_limit(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Configuration(err.to_string())
    }
}

impl ScoutConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: every field has a default, so the
    /// default configuration is returned and a warning is logged.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(
                "Configuration file {} not found, using defaults",
                path.display()
            );
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges. Environment variables are resolved lazily, so a
    /// missing connector token only disables that connector.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.model must not be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.connectors.default_limit == 0 {
            return Err(ConfigError::ValidationError(
                "connectors.default_limit must be at least 1".to_string(),
            ));
        }
        if self.pipeline.web_intel_limit == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.web_intel_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get the completion service API key from the environment
    pub fn llm_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.llm.api_key_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.llm.api_key_env.clone()))
    }

    /// Get the structured API bearer token, if configured
    pub fn structured_api_token(&self) -> Option<String> {
        self.resolve_env(&self.connectors.structured_api.token_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[llm]
provider = "openai"
api_base = "http://localhost:8080/v1"
api_key_env = "TEST_SCOUT_KEY"
model = "gpt-4o-mini"
temperature = 0.2

[connectors]
default_limit = 3

[connectors.browser]
enabled = false
scroll_delay_ms = 500

[connectors.structured_api]
token_env = "TEST_PH_TOKEN"

[pipeline]
web_intel_limit = 4

[prompts]
router_instructions = "route carefully"
"#
        .to_string()
    }

    #[test]
    fn test_parse_full_config() {
        let config = ScoutConfig::from_toml_str(&create_test_config()).unwrap();

        assert_eq!(config.llm.provider, ProviderKind::OpenAI);
        assert_eq!(config.llm.api_base.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.connectors.default_limit, 3);
        assert!(!config.connectors.browser.enabled);
        assert_eq!(config.connectors.browser.scroll_delay_ms, 500);
        // untouched sections keep their defaults
        assert_eq!(config.connectors.browser.timeout_secs, 120);
        assert!(config.connectors.html.enabled);
        assert_eq!(config.pipeline.web_intel_limit, 4);
        assert_eq!(config.prompts.router_instructions, "route carefully");
        assert_eq!(
            config.prompts.synth_system,
            crate::prompts::SYNTH_SYSTEM_PROMPT
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ScoutConfig::from_toml_str("").unwrap();
        assert_eq!(config.llm.provider, ProviderKind::Gemini);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.connectors.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.pipeline.web_intel_limit, 6);
    }

    #[test]
    fn test_validation_rejects_zero_limit() {
        let result = ScoutConfig::from_toml_str("[connectors]\ndefault_limit = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_rejects_temperature_out_of_range() {
        let result = ScoutConfig::from_toml_str("[llm]\ntemperature = 3.5\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ScoutConfig::load("/nonexistent/scout.toml").unwrap();
        assert_eq!(config.connectors.default_limit, 5);
    }

    #[test]
    fn test_missing_api_key_env() {
        let config = ScoutConfig::from_toml_str(
            "[llm]\napi_key_env = \"SCOUT_TEST_DEFINITELY_UNSET_KEY\"\n",
        )
        .unwrap();
        assert!(matches!(
            config.llm_api_key(),
            Err(ConfigError::MissingEnvVar(name)) if name == "SCOUT_TEST_DEFINITELY_UNSET_KEY"
        ));
    }
}
