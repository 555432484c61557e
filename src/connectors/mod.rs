//! Source connectors.
//!
//! Each connector fetches raw items from one external source and normalizes
//! them into [`Document`]s. Connectors never fail the caller: [`Connector::fetch`]
//! logs any error from [`Connector::try_fetch`] and yields an empty list.
//!
//! | Connector | Source | Signal |
//! |-----------|--------|--------|
//! | [`BrowserConnector`] | Startup directory (rendered, infinite scroll) | `supply_signal` |
//! | [`ProductHuntConnector`] | Launch platform GraphQL API | `market_velocity` |
//! | [`DevpostConnector`] | Hackathon project gallery (static HTML) | `technical_signal` |
//! | [`DorkConnector`] | Pre-built forum search queries | `social_signal` |

pub mod browser;
pub mod dork;
pub mod html_scrape;
pub mod structured_api;

pub use browser::BrowserConnector;
pub use dork::DorkConnector;
pub use html_scrape::DevpostConnector;
pub use structured_api::ProductHuntConnector;

use crate::types::Document;
use async_trait::async_trait;

/// Errors raised inside a connector. They never cross the [`Connector::fetch`]
/// boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Task failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for ConnectorError {
    fn from(err: tokio::task::JoinError) -> Self {
        ConnectorError::Join(err.to_string())
    }
}

/// A single external source.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Fetch up to `limit` documents for `query`.
    async fn try_fetch(&self, query: &str, limit: usize)
    -> Result<Vec<Document>, ConnectorError>;

    /// Like [`Connector::try_fetch`], but any failure degrades to an empty list.
    async fn fetch(&self, query: &str, limit: usize) -> Vec<Document> {
        match self.try_fetch(query, limit).await {
            Ok(docs) => {
                tracing::debug!(connector = self.name(), count = docs.len(), "Connector finished");
                docs
            }
            Err(e) => {
                tracing::warn!(connector = self.name(), error = %e, "Connector failed, returning no documents");
                Vec::new()
            }
        }
    }
}

/// Build a reqwest client carrying the configured browser-like user agent.
pub(crate) fn http_client(user_agent: &str) -> Result<reqwest::Client, ConnectorError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(ConnectorError::from)
}
