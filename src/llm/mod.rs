//! LLM Provider Clients and Abstractions
//!
//! Every stage that needs a completion goes through the [`LLMClient`] trait, so
//! the pipeline never knows which provider (or test double) answers.
//!
//! # Supported Providers
//!
//! - `gemini` - Google Gemini via its OpenAI-compatible endpoint (default)
//! - `openai` - OpenAI or any compatible API (set `api_base` in `[llm]`)
//!
//! # Example
//!
//! ```ignore
//! use scout::llm::Provider;
//!
//! let client = Provider::from_config(&config)?.create_client()?;
//! let answer = client.generate_with_system("Be terse.", "What is 2+2?").await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// OpenAI-compatible chat completions client.
pub mod openai;

pub use client::{LLMClient, LLMResponse, Provider};
pub use openai::OpenAIClient;
