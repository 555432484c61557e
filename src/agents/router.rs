use crate::agents::AgentKind;
use crate::llm::LLMClient;
use crate::types::Result;
use crate::utils::parsing::parse_or_else;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_ROUTING_REASON: &str = "Default routing due to parsing error";

/// Which optional stages run for a query, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub selected_agents: Vec<AgentKind>,
    pub reason: String,
}

impl RoutingDecision {
    /// Every optional stage selected
    pub fn run_all(reason: impl Into<String>) -> Self {
        Self {
            selected_agents: AgentKind::ALL.to_vec(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRouting {
    #[serde(default)]
    selected_agents: Vec<String>,
    #[serde(default)]
    reason: String,
}

/// Router agent that decides which specialized agents handle a query.
///
/// Uses an LLM to analyze the query; the answer is matched tolerantly and a
/// response that cannot be read selects every agent.
#[derive(Clone)]
pub struct RouterAgent {
    llm: Arc<dyn LLMClient>,
    system_prompt: String,
    instructions: String,
}

impl RouterAgent {
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

    /// Match one agent name from model output
    ///
    /// This handles various output formats:
    /// - Exact display name: "Web Intelligence Agent"
    /// - Different case or spacing: "web intelligence agent "
    /// - Shortened: "web_intel", "Report Generator"
    fn parse_agent_name(name: &str) -> Option<AgentKind> {
        let trimmed = name.trim();

        // First, try exact match
        if let Some(kind) = AgentKind::ALL.into_iter().find(|k| k.display_name() == trimmed) {
            return Some(kind);
        }

        // Then keyword containment
        let lowered = trimmed.to_lowercase();
        if lowered.contains("web") {
            Some(AgentKind::WebIntelligence)
        } else if lowered.contains("report") {
            Some(AgentKind::ReportGenerator)
        } else {
            None
        }
    }

    /// Read a routing decision from raw model output.
    pub fn parse_routing_decision(output: &str) -> RoutingDecision {
        parse_or_else(output, Self::from_raw, |text| {
            tracing::debug!("Router output '{}' not parseable, selecting all agents", text);
            RoutingDecision::run_all(DEFAULT_ROUTING_REASON)
        })
    }

    fn from_raw(raw: RawRouting) -> RoutingDecision {
        let mut selected = Vec::new();
        for name in &raw.selected_agents {
            match Self::parse_agent_name(name) {
                Some(kind) if !selected.contains(&kind) => selected.push(kind),
                Some(_) => {}
                None => tracing::debug!("Ignoring unknown agent '{}'", name),
            }
        }

        RoutingDecision {
            selected_agents: selected,
            reason: raw.reason,
        }
    }

    /// Ask the completion service which agents should run.
    pub async fn route(&self, query: &str) -> Result<RoutingDecision> {
        let user_message = format!(
            "Analyze this query and route it appropriately:\n\nQuery: {}\n\n{}",
            query, self.instructions
        );
        let response = self
            .llm
            .generate_with_system(&self.system_prompt, &user_message)
            .await?;

        let decision = Self::parse_routing_decision(&response);
        tracing::info!(
            selected = ?decision.selected_agents,
            reason = %decision.reason,
            "Routing decision"
        );
        Ok(decision)
    }
}
