//! Tools the completion service can call.
//!
//! - [`registry`](crate::tools::registry) - the [`Tool`](registry::Tool) trait
//!   and tool registration, discovery and execution
//! - [`search`](crate::tools::search) - `search_web`, backed by the aggregator
//!
//! ```ignore
//! let registry = ToolRegistry::with_search(aggregator, 6);
//! let definitions = registry.get_tool_definitions();
//! let docs = registry.execute("search_web", json!({"query": "payroll"})).await?;
//! ```

/// Tool registry for managing available tools.
pub mod registry;
/// Aggregator-backed `search_web` tool.
pub mod search;

pub use registry::{Tool, ToolRegistry};
pub use search::{SEARCH_WEB, SearchWebTool};
