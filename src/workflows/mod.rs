//! Orchestration Pipeline
//!
//! A linear state machine: `router -> web_intel -> report_generator ->
//! synthesizer`. Stages run strictly one after another over an explicit
//! [`MasterState`]; `web_intel` and `report_generator` pass through unless the
//! router selected them.
//!
//! # Usage
//!
//! ```ignore
//! let pipeline = MasterPipeline::from_config(&config, llm);
//! let output = pipeline.run("AI tools for bookkeeping").await;
//! println!("{}", output.final_summary);
//! ```

pub mod engine;
pub mod stages;

pub use engine::{
    MasterPipeline, MasterState, PipelineRun, Stage, StageDelta, StageOutput, StageStep,
};
pub use stages::{ReportStage, RouterStage, SynthesizerStage, WebIntelStage};

use crate::agents::{ReportAgent, RouterAgent, SynthesizerAgent, WebIntelAgent};
use crate::llm::LLMClient;
use crate::research::{Aggregator, Summarizer};
use crate::tools::ToolRegistry;
use crate::utils::toml_config::ScoutConfig;
use std::sync::Arc;

impl MasterPipeline {
    /// Standard four-stage pipeline over the given aggregator.
    pub fn with_aggregator(config: &ScoutConfig, llm: Arc<dyn LLMClient>, aggregator: Aggregator) -> Self {
        let prompts = &config.prompts;
        let tools = ToolRegistry::with_search(aggregator, config.pipeline.web_intel_limit);
        let summarizer = Summarizer::new(Arc::clone(&llm), prompts.web_intel_summary.clone());

        Self::new(vec![
            Box::new(RouterStage::new(RouterAgent::new(
                Arc::clone(&llm),
                prompts.router_system.clone(),
                prompts.router_instructions.clone(),
            ))),
            Box::new(WebIntelStage::new(WebIntelAgent::new(
                Arc::clone(&llm),
                tools,
                summarizer,
                prompts.web_intel_system.clone(),
                prompts.briefing.clone(),
            ))),
            Box::new(ReportStage::new(ReportAgent::new(
                Arc::clone(&llm),
                prompts.report.clone(),
            ))),
            Box::new(SynthesizerStage::new(SynthesizerAgent::new(
                llm,
                prompts.synth_system.clone(),
                prompts.synth_instructions.clone(),
            ))),
        ])
    }

    /// Standard pipeline with connectors built from configuration.
    pub fn from_config(config: &ScoutConfig, llm: Arc<dyn LLMClient>) -> Self {
        Self::with_aggregator(config, llm, Aggregator::from_config(config))
    }
}
