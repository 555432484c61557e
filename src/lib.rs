//! # Scout - multi-agent market intelligence
//!
//! Scout gathers signals about a market from heterogeneous sources (a startup
//! directory, a product-launch platform, a hackathon gallery and forum search
//! strings), normalizes them into [`types::Document`]s, summarizes them with a
//! completion service and synthesizes a structured report with tables and
//! charts.
//!
//! ## Overview
//!
//! Scout can be used in two ways:
//!
//! 1. **As a command-line tool** - Run the `scout` binary
//! 2. **As a library** - Build the pipeline or its parts in your own project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use scout::{MasterPipeline, Provider, ScoutConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScoutConfig::load("scout.toml")?;
//!     let llm = Provider::from_config(&config)?.create_client()?;
//!
//!     let pipeline = MasterPipeline::from_config(&config, llm);
//!     let output = pipeline.run("AI bookkeeping for freelancers").await;
//!     println!("{}", output.final_summary);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Connectors Only
//!
//! ```rust,ignore
//! use scout::{Aggregator, ScoutConfig};
//!
//! let aggregator = Aggregator::from_config(&ScoutConfig::default());
//! let docs = aggregator.fetch_all("pet insurance", 5, None).await;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `browser` | Headless Chromium session for the infinite-scroll connector (default) |
//!
//! ## Modules
//!
//! - [`connectors`] - Source connectors producing normalized documents
//! - [`research`] - Aggregation and summarization
//! - [`agents`] - Router, web-intelligence, report and synthesizer agents
//! - [`workflows`] - The sequential orchestration pipeline
//! - [`llm`] - Completion service clients
//! - [`tools`] - Tool definitions and registry
//! - [`types`] - Common types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Routing, research, report and synthesis agents.
pub mod agents;
/// Command-line parsing and terminal output.
pub mod cli;
/// Source connectors (browser scroll, structured API, HTML scrape, dorks).
pub mod connectors;
/// Completion service clients and abstractions.
pub mod llm;
/// Default instruction strings for every completion call.
pub mod prompts;
/// Multi-source aggregation and summarization.
pub mod research;
/// Tools exposed to the completion service.
pub mod tools;
/// Core types (documents, outputs, errors).
pub mod types;
/// Configuration and parsing utilities.
pub mod utils;
/// Sequential orchestration pipeline.
pub mod workflows;

// Re-export commonly used types
pub use connectors::{Connector, ConnectorError};
pub use llm::{LLMClient, LLMResponse, Provider};
pub use research::{Aggregator, Summarizer};
pub use tools::ToolRegistry;
pub use types::{AppError, Document, Result, SummaryResult, SynthOutput};
pub use utils::toml_config::ScoutConfig;
pub use workflows::{MasterPipeline, MasterState, StageStep};
