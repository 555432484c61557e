//! The four pipeline stages: router, web_intel, report_generator, synthesizer.

use super::engine::{MasterState, REPORT_KEY, Stage, StageDelta, StageOutput, WEB_INTEL_KEY};
use crate::agents::{AgentKind, ReportAgent, RouterAgent, SynthesizerAgent, WebIntelAgent};
use crate::types::Result;
use async_trait::async_trait;

pub struct RouterStage {
    agent: RouterAgent,
}

impl RouterStage {
    pub fn new(agent: RouterAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Stage for RouterStage {
    fn name(&self) -> &str {
        "router"
    }

    async fn run(&self, state: &MasterState) -> Result<StageDelta> {
        let decision = self.agent.route(&state.query).await?;
        Ok(StageDelta {
            selected_agents: Some(decision.selected_agents),
            routing_reason: Some(decision.reason),
            ..Default::default()
        })
    }
}

pub struct WebIntelStage {
    agent: WebIntelAgent,
}

impl WebIntelStage {
    pub fn new(agent: WebIntelAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Stage for WebIntelStage {
    fn name(&self) -> &str {
        "web_intel"
    }

    async fn run(&self, state: &MasterState) -> Result<StageDelta> {
        if !state.is_selected(AgentKind::WebIntelligence) {
            return Ok(StageDelta::skip());
        }
        let output = self.agent.investigate(&state.query).await?;
        Ok(StageDelta::result(WEB_INTEL_KEY, StageOutput::WebIntel(output)))
    }
}

pub struct ReportStage {
    agent: ReportAgent,
}

impl ReportStage {
    pub fn new(agent: ReportAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Stage for ReportStage {
    fn name(&self) -> &str {
        "report_generator"
    }

    async fn run(&self, state: &MasterState) -> Result<StageDelta> {
        if !state.is_selected(AgentKind::ReportGenerator) {
            return Ok(StageDelta::skip());
        }
        let context = state.results_context("No previous data")?;
        let report = self.agent.generate(&state.query, &context).await;
        Ok(StageDelta::result(REPORT_KEY, StageOutput::Report(report)))
    }
}

pub struct SynthesizerStage {
    agent: SynthesizerAgent,
}

impl SynthesizerStage {
    pub fn new(agent: SynthesizerAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Stage for SynthesizerStage {
    fn name(&self) -> &str {
        "synthesizer"
    }

    async fn run(&self, state: &MasterState) -> Result<StageDelta> {
        let context = state.results_context("No data available")?;
        let output = self.agent.synthesize(&state.query, &context).await?;
        Ok(StageDelta {
            final_output: Some(output),
            ..Default::default()
        })
    }
}
