//! Specialized agents used by the pipeline stages.
//!
//! - [`router::RouterAgent`] - picks which optional agents run
//! - [`web_intel::WebIntelAgent`] - gathers and summarizes market signals
//! - [`report::ReportAgent`] - writes a report from accumulated results
//! - [`synthesizer::SynthesizerAgent`] - combines everything into the final output
//! - [`assembler`] - shared parsing of report and synthesis responses

pub mod assembler;
pub mod report;
pub mod router;
pub mod synthesizer;
pub mod web_intel;

pub use report::ReportAgent;
pub use router::{RouterAgent, RoutingDecision};
pub use synthesizer::SynthesizerAgent;
pub use web_intel::{WebIntelAgent, WebIntelOutput};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional agents the router can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    #[serde(rename = "Web Intelligence Agent")]
    WebIntelligence,
    #[serde(rename = "Report Generator Agent")]
    ReportGenerator,
}

impl AgentKind {
    /// Every selectable agent, in stage order
    pub const ALL: [AgentKind; 2] = [AgentKind::WebIntelligence, AgentKind::ReportGenerator];

    /// Name the router is asked to answer with
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::WebIntelligence => "Web Intelligence Agent",
            AgentKind::ReportGenerator => "Report Generator Agent",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
