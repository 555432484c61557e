//! LLM Client abstractions and provider selection
//!
//! The completion service is treated as a black box that accepts instruction
//! text (optionally with tool declarations) and returns free-form text:
//! - **OpenAI**: any OpenAI-compatible chat completions endpoint
//! - **Gemini**: Google Gemini through its OpenAI-compatible endpoint

use super::openai::OpenAIClient;
use crate::types::{AppError, Result, ToolCall, ToolDefinition};
use crate::utils::toml_config::{ProviderKind, ScoutConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// A black-box completion service.
///
/// Agents only ever see this trait; tests substitute scripted clients.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Single user message
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// System instruction followed by one user message
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Replay `(role, content)` pairs; roles are `system`, `user` or `assistant`
    async fn generate_with_history(
        &self,
        messages: &[(String, String)],
    ) -> Result<String>;

    /// Declare `tools` and let the model either answer or request calls
    async fn generate_with_tools(
        &self,
        system: &str,
        prompt: &str,
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse>;

    /// Model identifier sent with every request
    fn model_name(&self) -> &str;
}

/// Answer to a tool-enabled completion request
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Text part of the answer, empty when the model only requested tools
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    /// `stop`, `tool_calls`, `length`...
    pub finish_reason: String,
}

/// OpenAI-compatible endpoint serving Gemini models
pub const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

/// Default OpenAI endpoint
pub const OPENAI_BASE: &str = "https://api.openai.com/v1";

/// Completion backend selected from `[llm]`.
///
/// Gemini with an `api_base` override becomes `OpenAI` pointed at that base.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Any OpenAI-compatible chat completions endpoint
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        temperature: f32,
    },

    /// Google Gemini
    Gemini {
        api_key: String,
        model: String,
        temperature: f32,
    },
}

impl Provider {
    /// Build the provider described by the `[llm]` section.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the API key variable is not set.
    pub fn from_config(config: &ScoutConfig) -> Result<Self> {
        let api_key = config.llm_api_key()?;
        let llm = &config.llm;

        Ok(match (llm.provider, &llm.api_base) {
            (ProviderKind::Gemini, None) => Provider::Gemini {
                api_key,
                model: llm.model.clone(),
                temperature: llm.temperature,
            },
            (ProviderKind::Gemini, Some(base)) | (ProviderKind::OpenAI, Some(base)) => {
                Provider::OpenAI {
                    api_key,
                    api_base: base.clone(),
                    model: llm.model.clone(),
                    temperature: llm.temperature,
                }
            }
            (ProviderKind::OpenAI, None) => Provider::OpenAI {
                api_key,
                api_base: OPENAI_BASE.to_string(),
                model: llm.model.clone(),
                temperature: llm.temperature,
            },
        })
    }

    /// Build the client. Both variants speak the OpenAI chat completions protocol.
    pub fn create_client(&self) -> Result<Arc<dyn LLMClient>> {
        let (api_key, api_base, model, temperature) = match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                temperature,
            } => (api_key, api_base.as_str(), model, *temperature),
            Provider::Gemini {
                api_key,
                model,
                temperature,
            } => (api_key, GEMINI_OPENAI_BASE, model, *temperature),
        };

        if api_key.is_empty() {
            return Err(AppError::Configuration(format!(
                "{} provider requires an API key",
                self.name()
            )));
        }

        tracing::debug!(provider = self.name(), %api_base, %model, "Creating completion client");
        let client = OpenAIClient::new(api_key.clone(), api_base.to_string(), model.clone())
            .with_temperature(temperature);
        Ok(Arc::new(client))
    }

    /// Label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Gemini { .. } => "Gemini",
        }
    }

    /// Model identifier used for every completion call
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAI { model, .. } | Provider::Gemini { model, .. } => model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let openai = Provider::OpenAI {
            api_key: "".to_string(),
            api_base: "".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
        };
        assert_eq!(openai.name(), "OpenAI");
        assert_eq!(openai.model(), "gpt-4o-mini");

        let gemini = Provider::Gemini {
            api_key: "".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.0,
        };
        assert_eq!(gemini.name(), "Gemini");
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let provider = Provider::Gemini {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.0,
        };

        // Arc<dyn LLMClient> doesn't implement Debug, so match instead of unwrap_err
        let err = match provider.create_client() {
            Ok(_) => panic!("Expected error"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("requires an API key"));
    }

    #[test]
    fn test_gemini_client_uses_configured_model() {
        let provider = Provider::Gemini {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.0,
        };
        let client = provider.create_client().unwrap();
        assert_eq!(client.model_name(), "gemini-2.5-flash");
    }

    #[test]
    fn test_from_config_with_api_base_override() {
        std::env::set_var("SCOUT_CLIENT_TEST_KEY", "secret");
        let config = ScoutConfig::from_toml_str(
            r#"
[llm]
provider = "gemini"
api_base = "http://localhost:9999/v1"
api_key_env = "SCOUT_CLIENT_TEST_KEY"
model = "gemini-2.5-pro"
"#,
        )
        .unwrap();

        match Provider::from_config(&config).unwrap() {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                ..
            } => {
                assert_eq!(api_key, "secret");
                assert_eq!(api_base, "http://localhost:9999/v1");
                assert_eq!(model, "gemini-2.5-pro");
            }
            other => panic!("Expected OpenAI-compatible provider, got {}", other.name()),
        }
    }
}
