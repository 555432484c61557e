use serde::{Deserialize, Serialize};

// ============= Document Types =============

/// Category tags attached to gathered documents.
///
/// The set is open: connectors and callers may use other tags, these are the
/// ones produced by the built-in connectors.
pub mod signal {
    pub const SUPPLY: &str = "supply_signal";
    pub const MARKET_VELOCITY: &str = "market_velocity";
    pub const TECHNICAL: &str = "technical_signal";
    pub const SOCIAL: &str = "social_signal";
}

/// Canonical, connector-agnostic record describing one piece of gathered
/// intelligence.
///
/// `source` and `doc_type` are always present. Every descriptive field is
/// optional: consumers treat a missing field as absent, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub source: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    /// Search-engine query string carried by dork entries instead of content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dork: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Document {
    pub fn new(source: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            doc_type: doc_type.into(),
            ..Default::default()
        }
    }

    /// Display label: explicit title, then name, then the dork string.
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .or(self.dork.as_deref())
    }

    /// Short descriptive text: snippet, then description, then tagline.
    pub fn excerpt(&self) -> Option<&str> {
        self.snippet
            .as_deref()
            .or(self.description.as_deref())
            .or(self.tagline.as_deref())
    }

    /// Reduce to the canonical subset handed to the completion service:
    /// `title`, `url`, `snippet`, `full_text`, `source`, `type` and `date`.
    pub fn canonical(&self) -> Document {
        Document {
            source: self.source.clone(),
            doc_type: self.doc_type.clone(),
            title: self.display_title().map(str::to_string),
            url: self.url.clone(),
            snippet: self.excerpt().map(str::to_string),
            full_text: self.full_text.clone(),
            date: self.date.clone(),
            ..Default::default()
        }
    }
}

// ============= Summary Types =============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "type")]
    pub source_type: Option<String>,
    #[serde(default)]
    pub credibility: String,
}

/// Structured summary of a gathered document set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub query: String,
    pub summary: Vec<String>,
    pub quotes: Vec<Quote>,
    pub top_sources: Vec<TopSource>,
    pub guideline_extracts: Vec<serde_json::Value>,
    pub notes: String,
    pub documents_used: Vec<Document>,
}

// ============= Output Types =============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub title: String,
    pub columns: Vec<String>,
    /// Every row has exactly `columns.len()` cells
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    /// Same length as `labels`
    pub values: Vec<f64>,
}

/// Final response of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthOutput {
    pub final_summary: String,
    pub recommendations: String,
    #[serde(default)]
    pub tables: Vec<TableSpec>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

/// Recommendation carried by every error response.
pub const RETRY_RECOMMENDATION: &str = "Please try again with a different query.";

impl SynthOutput {
    /// Text-only output with no tables or charts.
    pub fn text(final_summary: impl Into<String>, recommendations: impl Into<String>) -> Self {
        Self {
            final_summary: final_summary.into(),
            recommendations: recommendations.into(),
            ..Default::default()
        }
    }

    /// Well-formed response describing a failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self::text(message, RETRY_RECOMMENDATION)
    }
}

// ============= Tool Types =============

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
