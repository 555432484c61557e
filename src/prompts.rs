//! Instruction strings sent to the completion service.
//!
//! The text is opaque to the pipeline: nothing parses it, and every string can
//! be overridden from the `[prompts]` section of `scout.toml`.

use serde::{Deserialize, Serialize};

pub const ROUTER_SYSTEM_PROMPT: &str = r#"You are an intelligent router agent. Analyze user queries and determine which agents should handle them.

Available agents:
1. Web Intelligence Agent - Gathers and analyzes information from web sources
2. Report Generator Agent - Creates comprehensive reports based on data

Respond in JSON format with:
{"selected_agents": ["agent_name1", "agent_name2"], "reason": "explanation"}"#;

pub const ROUTER_INSTRUCTIONS: &str = r#"Decide which specialized agents are needed for this request.
Do not answer the query yourself. Avoid selecting agents that add nothing.
Be concise and deterministic."#;

pub const WEB_INTEL_SYSTEM_PROMPT: &str = r#"You are a market intelligence researcher.
Always call the `search_web` tool exactly once with a focused query derived from the user request.
Use `limit` to bound the number of results per source and `types` to restrict signal categories
(supply_signal, market_velocity, technical_signal, social_signal) when the request is specific."#;

pub const WEB_INTEL_SUMMARY_PROMPT: &str = r#"You summarize gathered market signals.
The assistant message contains a JSON array of documents.
Respond ONLY with JSON of the shape:
{"summary": ["point", ...],
 "quotes": [{"text": "verbatim, at most 25 words", "source_url": "...", "context": "..."}],
 "top_sources": [{"title": "...", "url": "...", "type": "...", "credibility": "High|Medium|Low"}],
 "guideline_extracts": [],
 "notes": "caveats"}
Use at most 2 quotes. Never invent sources that are not in the documents."#;

pub const BRIEFING_PROMPT: &str = r#"You are preparing a market intelligence briefing.

Documents gathered from the sources:
{docs_array}

Structured summary of those documents:
{summary_array}

Write a concise briefing: the dominant signals, notable players, gaps worth exploring.
Only use facts present in the material above."#;

pub const REPORT_PROMPT: &str = r#"You are a professional report generator. Create a comprehensive report based on the following:

User Query: {query}
{context}

Generate a professional report with:
1. Executive Summary
2. Key Findings
3. Recommendations
4. Conclusions

Format the response as JSON with:
{"final_summary": "summary text", "recommendations": "recommendations text", "tables": [], "charts": []}"#;

pub const SYNTH_SYSTEM_PROMPT: &str = r#"You are a synthesis agent. Your job is to combine outputs from multiple agents into a comprehensive final response.

Always respond with JSON format:
{"final_summary": "text", "recommendations": "text",
 "tables": [{"title": "...", "columns": ["..."], "rows": [["..."]]}],
 "charts": [{"title": "...", "labels": ["..."], "values": [1.0]}]}"#;

pub const SYNTH_INSTRUCTIONS: &str = r#"Combine the agent outputs into one cohesive answer.
Remove duplication and contradictions, keep the important insights.
Do not introduce new assumptions and do not invent missing data.
The result must be structured, concise and decision-ready."#;

/// The full set of instruction strings used by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub router_system: String,
    pub router_instructions: String,
    pub web_intel_system: String,
    pub web_intel_summary: String,
    /// Must contain `{docs_array}` and `{summary_array}`
    pub briefing: String,
    /// Must contain `{query}` and `{context}`
    pub report: String,
    pub synth_system: String,
    pub synth_instructions: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            router_system: ROUTER_SYSTEM_PROMPT.to_string(),
            router_instructions: ROUTER_INSTRUCTIONS.to_string(),
            web_intel_system: WEB_INTEL_SYSTEM_PROMPT.to_string(),
            web_intel_summary: WEB_INTEL_SUMMARY_PROMPT.to_string(),
            briefing: BRIEFING_PROMPT.to_string(),
            report: REPORT_PROMPT.to_string(),
            synth_system: SYNTH_SYSTEM_PROMPT.to_string(),
            synth_instructions: SYNTH_INSTRUCTIONS.to_string(),
        }
    }
}

/// Substitute `{name}` placeholders in one pass over `template`.
///
/// Inserted values are never scanned again, so a value that itself contains
/// `{name}` is copied through verbatim. Braces that do not form a known
/// placeholder are left alone.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = vars.iter().find_map(|(name, value)| {
            tail.strip_prefix(name)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
