use crate::llm::LLMClient;
use crate::prompts;
use crate::research::Summarizer;
use crate::tools::{SEARCH_WEB, ToolRegistry};
use crate::types::{AppError, Document, Result, SummaryResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// What the web-intelligence stage stores under `"web_intel"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebIntelOutput {
    /// Query actually sent to the connectors
    pub query: String,
    pub documents_count: usize,
    pub summary: SummaryResult,
    /// Narrative briefing written from the documents and their summary
    pub briefing: String,
}

/// Gathers market signals through `search_web`, summarizes them, then writes
/// a briefing.
#[derive(Clone)]
pub struct WebIntelAgent {
    llm: Arc<dyn LLMClient>,
    tools: ToolRegistry,
    summarizer: Summarizer,
    system_prompt: String,
    briefing_template: String,
}

impl WebIntelAgent {
    pub fn new(
        llm: Arc<dyn LLMClient>,
        tools: ToolRegistry,
        summarizer: Summarizer,
        system_prompt: impl Into<String>,
        briefing_template: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            tools,
            summarizer,
            system_prompt: system_prompt.into(),
            briefing_template: briefing_template.into(),
        }
    }

    /// Arguments for `search_web`: the model's own when it asked for the
    /// tool, otherwise just the user query.
    async fn search_arguments(&self, query: &str) -> Result<Value> {
        let definitions = self.tools.get_tool_definitions();
        let response = self
            .llm
            .generate_with_tools(&self.system_prompt, query, &definitions)
            .await?;

        let call = response.tool_calls.into_iter().find(|c| c.name == SEARCH_WEB);
        let mut args = match call {
            Some(call) => {
                tracing::info!(args = %call.arguments, "Model called search_web");
                call.arguments
            }
            None => {
                tracing::warn!(
                    finish_reason = %response.finish_reason,
                    "Model did not call search_web, searching with the user query"
                );
                json!({})
            }
        };

        if !args.is_object() {
            args = json!({});
        }
        let has_query = args
            .get("query")
            .and_then(Value::as_str)
            .is_some_and(|q| !q.trim().is_empty());
        if !has_query {
            args["query"] = Value::String(query.to_string());
        }
        Ok(args)
    }

    fn briefing_prompt(&self, docs: &[Document], summary: &SummaryResult) -> Result<String> {
        let docs = serde_json::to_string_pretty(docs)?;
        let summary = serde_json::to_string_pretty(summary)?;
        Ok(prompts::fill(
            &self.briefing_template,
            &[("docs_array", &docs), ("summary_array", &summary)],
        ))
    }

    /// Run the full gather, summarize, brief sequence for `query`.
    pub async fn investigate(&self, query: &str) -> Result<WebIntelOutput> {
        let args = self.search_arguments(query).await?;
        let search_query = args["query"].as_str().unwrap_or(query).to_string();

        let raw_docs = self.tools.execute(SEARCH_WEB, args).await?;
        let docs: Vec<Document> = serde_json::from_value(raw_docs)
            .map_err(|e| AppError::Internal(format!("search_web returned unexpected shape: {e}")))?;
        tracing::info!(count = docs.len(), "Retrieved documents from connectors");

        let summary = self.summarizer.synthesize(&search_query, &docs).await?;
        let briefing = self.llm.generate(&self.briefing_prompt(&docs, &summary)?).await?;

        Ok(WebIntelOutput {
            query: search_query,
            documents_count: docs.len(),
            summary,
            briefing,
        })
    }
}
