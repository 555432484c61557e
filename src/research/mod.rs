//! Multi-source research: gathering and summarizing market signals.
//!
//! - [`aggregator::Aggregator`] - runs every enabled connector and merges
//!   their documents in a fixed priority order
//! - [`summarizer::Summarizer`] - turns a document set into a structured
//!   summary with one completion request, with a deterministic fallback
//!
//! # Usage
//!
//! ```ignore
//! use scout::research::{Aggregator, Summarizer};
//!
//! let docs = Aggregator::from_config(&config).fetch_all("payroll", 5, None).await;
//! let summary = Summarizer::new(llm, config.prompts.web_intel_summary.clone())
//!     .synthesize("payroll", &docs)
//!     .await?;
//! ```

/// Concurrent connector fan-out with ordered merge and type filtering.
pub mod aggregator;
/// Structured summaries with strict-parse-then-fallback handling.
pub mod summarizer;

pub use aggregator::Aggregator;
pub use summarizer::Summarizer;
