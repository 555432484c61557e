//! `search_web`: the aggregator exposed as a callable tool.

use crate::research::Aggregator;
use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

pub const SEARCH_WEB: &str = "search_web";

pub struct SearchWebTool {
    aggregator: Aggregator,
    default_limit: usize,
}

impl SearchWebTool {
    pub fn new(aggregator: Aggregator, default_limit: usize) -> Self {
        Self {
            aggregator,
            default_limit,
        }
    }
}

#[async_trait]
impl Tool for SearchWebTool {
    fn name(&self) -> &str {
        SEARCH_WEB
    }

    fn description(&self) -> &str {
        "Search startup directories, launch platforms, hackathon galleries and forums. Returns a JSON array of normalized documents."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Focused search query"
                },
                "limit": {
                    "type": "integer",
                    "description": format!("Maximum results per source (default: {})", self.default_limit)
                },
                "types": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Optional filter: supply_signal, market_velocity, technical_signal, social_signal"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::InvalidInput("Missing 'query' parameter".to_string()))?;

        let limit = args
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .filter(|n| *n > 0)
            .unwrap_or(self.default_limit);

        let types: Option<Vec<String>> = args.get("types").and_then(|v| v.as_array()).map(|items| {
            items
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect()
        });

        let docs = self
            .aggregator
            .fetch_all(query, limit, types.as_deref())
            .await;

        Ok(serde_json::to_value(docs)?)
    }
}
