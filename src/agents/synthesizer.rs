use crate::agents::assembler::assemble;
use crate::llm::LLMClient;
use crate::types::{Result, SynthOutput};
use std::sync::Arc;

/// Combines every stage's results into the final [`SynthOutput`].
#[derive(Clone)]
pub struct SynthesizerAgent {
    llm: Arc<dyn LLMClient>,
    system_prompt: String,
    instructions: String,
}

impl SynthesizerAgent {
    pub fn new(
        llm: Arc<dyn LLMClient>,
        system_prompt: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            instructions: instructions.into(),
        }
    }

    /// # Errors
    ///
    /// Completion failures propagate; an unstructured answer becomes a
    /// text-only output with empty recommendations.
    pub async fn synthesize(&self, query: &str, results_context: &str) -> Result<SynthOutput> {
        let user_message = format!(
            "Synthesize these results for the query.\n\n\
             Original Query: {query}\n\n\
             Agent Results:\n{results_context}\n\n\
             {}\n\n\
             Provide a comprehensive final summary with recommendations.",
            self.instructions
        );

        let content = self
            .llm
            .generate_with_system(&self.system_prompt, &user_message)
            .await?;
        Ok(assemble(&content, ""))
    }
}
