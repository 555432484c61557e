use crate::agents::assembler::assemble;
use crate::llm::LLMClient;
use crate::prompts;
use crate::types::{RETRY_RECOMMENDATION, SynthOutput};
use std::sync::Arc;

/// Recommendation used when the report comes back as plain text
pub const REPORT_FALLBACK_RECOMMENDATION: &str = "See findings above for detailed recommendations.";

/// Writes a structured report from the query and accumulated results.
///
/// Completion failures are reported inside the returned output rather than
/// as errors, so a failed report never stops the pipeline.
#[derive(Clone)]
pub struct ReportAgent {
    llm: Arc<dyn LLMClient>,
    template: String,
}

impl ReportAgent {
    /// `template` must contain `{query}` and `{context}`.
    pub fn new(llm: Arc<dyn LLMClient>, template: impl Into<String>) -> Self {
        Self {
            llm,
            template: template.into(),
        }
    }

    fn prompt(&self, query: &str, context: &str) -> String {
        let context = if context.is_empty() {
            String::new()
        } else {
            format!("\nContext from previous analysis:\n{context}")
        };
        prompts::fill(&self.template, &[("query", query), ("context", &context)])
    }

    pub async fn generate(&self, query: &str, context: &str) -> SynthOutput {
        match self.llm.generate(&self.prompt(query, context)).await {
            Ok(content) => assemble(&content, REPORT_FALLBACK_RECOMMENDATION),
            Err(e) => {
                tracing::error!(error = %e, "Report generation failed");
                SynthOutput::text(format!("Error generating report: {e}"), RETRY_RECOMMENDATION)
            }
        }
    }
}
