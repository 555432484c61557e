//! Pipeline Engine
//!
//! Runs the stages in order over an explicit [`MasterState`]. Each stage reads
//! the current state and returns a [`StageDelta`]; the engine applies deltas
//! one at a time, so no stage ever sees partially merged state.

use crate::agents::{AgentKind, WebIntelOutput};
use crate::types::{Result, SynthOutput};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;

/// Results key of the web-intelligence stage
pub const WEB_INTEL_KEY: &str = "web_intel";
/// Results key of the report stage
pub const REPORT_KEY: &str = "report";

pub const NO_OUTPUT: &str = "No output generated";

/// A value stored in the shared results mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageOutput {
    WebIntel(WebIntelOutput),
    Report(SynthOutput),
}

/// State carried through one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterState {
    pub query: String,
    pub selected_agents: Vec<AgentKind>,
    pub routing_reason: String,
    pub results: BTreeMap<String, StageOutput>,
    pub final_output: Option<SynthOutput>,
}

impl MasterState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn is_selected(&self, kind: AgentKind) -> bool {
        self.selected_agents.contains(&kind)
    }

    /// Accumulated results as JSON, or `empty` when there are none.
    pub fn results_context(&self, empty: &str) -> Result<String> {
        if self.results.is_empty() {
            Ok(empty.to_string())
        } else {
            Ok(serde_json::to_string(&self.results)?)
        }
    }

    /// Merge a stage's changes. Fields the delta leaves unset are kept.
    pub fn apply(&mut self, delta: StageDelta) {
        if let Some(selected) = delta.selected_agents {
            self.selected_agents = selected;
        }
        if let Some(reason) = delta.routing_reason {
            self.routing_reason = reason;
        }
        self.results.extend(delta.results);
        if let Some(output) = delta.final_output {
            self.final_output = Some(output);
        }
    }
}

/// Changes produced by one stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageDelta {
    pub selected_agents: Option<Vec<AgentKind>>,
    pub routing_reason: Option<String>,
    pub results: Vec<(String, StageOutput)>,
    pub final_output: Option<SynthOutput>,
    /// The stage was not selected and did nothing
    pub skipped: bool,
}

impl StageDelta {
    pub fn skip() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }

    pub fn result(key: impl Into<String>, output: StageOutput) -> Self {
        Self {
            results: vec![(key.into(), output)],
            ..Default::default()
        }
    }
}

/// One step of the sequential pipeline.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, state: &MasterState) -> Result<StageDelta>;
}

/// A single step in the pipeline execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageStep {
    /// The stage that executed this step
    pub stage: String,
    /// When the stage started
    pub started_at: DateTime<Utc>,
    /// Duration of this step in milliseconds
    pub duration_ms: u64,
    /// Whether the stage passed through without doing anything
    pub skipped: bool,
}

/// Final state plus the per-stage trace of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub state: MasterState,
    pub steps: Vec<StageStep>,
}

/// Sequential stage driver.
pub struct MasterPipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl MasterPipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage, stopping at the first error.
    pub async fn execute(&self, query: &str) -> Result<PipelineRun> {
        let mut state = MasterState::new(query);
        let mut steps = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let step_start = std::time::Instant::now();
            let started_at = Utc::now();

            let delta = stage.run(&state).await?;
            let duration_ms = step_start.elapsed().as_millis() as u64;

            tracing::info!(
                stage = stage.name(),
                duration_ms,
                skipped = delta.skipped,
                "Stage finished"
            );
            steps.push(StageStep {
                stage: stage.name().to_string(),
                started_at,
                duration_ms,
                skipped: delta.skipped,
            });
            state.apply(delta);
        }

        Ok(PipelineRun { state, steps })
    }

    /// Run the pipeline and always return a well-formed output.
    ///
    /// Errors and panics anywhere in the chain become an error output.
    pub async fn run_traced(&self, query: &str) -> (SynthOutput, Vec<StageStep>) {
        match AssertUnwindSafe(self.execute(query)).catch_unwind().await {
            Ok(Ok(run)) => {
                let output = run.state.final_output.unwrap_or_else(|| SynthOutput::error(NO_OUTPUT));
                (output, run.steps)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Pipeline failed");
                (SynthOutput::error(format!("Error processing query: {e}")), Vec::new())
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unexpected panic".to_string());
                tracing::error!(panic = %message, "Pipeline panicked");
                (
                    SynthOutput::error(format!("Error processing query: {message}")),
                    Vec::new(),
                )
            }
        }
    }

    pub async fn run(&self, query: &str) -> SynthOutput {
        self.run_traced(query).await.0
    }
}
