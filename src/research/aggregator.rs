use crate::connectors::{
    BrowserConnector, Connector, DevpostConnector, DorkConnector, ProductHuntConnector,
    browser::ScrollSettings,
};
use crate::types::Document;
use crate::utils::toml_config::ScoutConfig;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Runs every connector for a query and merges their results.
///
/// Connectors run concurrently but results are always concatenated in
/// registration order, so output never depends on which source answers first.
#[derive(Clone)]
pub struct Aggregator {
    connectors: Vec<Arc<dyn Connector>>,
}

impl Aggregator {
    pub fn new(connectors: Vec<Arc<dyn Connector>>) -> Self {
        Self { connectors }
    }

    /// Enabled connectors in priority order: browser, structured API, HTML, dork.
    pub fn from_config(config: &ScoutConfig) -> Self {
        let c = &config.connectors;
        let mut connectors: Vec<Arc<dyn Connector>> = Vec::new();

        if c.browser.enabled {
            let settings = ScrollSettings {
                base_url: c.browser.base_url.clone(),
                user_agent: c.user_agent.clone(),
                scroll_delay: Duration::from_millis(c.browser.scroll_delay_ms),
                timeout: Duration::from_secs(c.browser.timeout_secs),
                headless: c.browser.headless,
            };
            connectors.push(Arc::new(BrowserConnector::chromium(settings)));
        }
        if c.structured_api.enabled {
            connectors.push(Arc::new(ProductHuntConnector::new(
                c.structured_api.api_url.clone(),
                config.structured_api_token(),
                c.user_agent.clone(),
            )));
        }
        if c.html.enabled {
            connectors.push(Arc::new(DevpostConnector::new(
                c.html.base_url.clone(),
                c.user_agent.clone(),
            )));
        }
        if c.dork.enabled {
            connectors.push(Arc::new(DorkConnector));
        }

        Self { connectors }
    }

    pub fn connector_names(&self) -> Vec<&str> {
        self.connectors.iter().map(|c| c.name()).collect()
    }

    /// Gather documents from every connector.
    ///
    /// A failing or panicking connector contributes nothing. When `types` is
    /// non-empty only documents whose `type` is listed are kept, in order.
    pub async fn fetch_all(
        &self,
        query: &str,
        limit: usize,
        types: Option<&[String]>,
    ) -> Vec<Document> {
        let handles = self.connectors.iter().map(|connector| {
            let connector = Arc::clone(connector);
            let query = query.to_string();
            tokio::spawn(async move { connector.fetch(&query, limit).await })
        });

        let results = join_all(handles).await;

        let mut documents = Vec::new();
        for (connector, result) in self.connectors.iter().zip(results) {
            match result {
                Ok(docs) => documents.extend(docs),
                Err(e) => {
                    tracing::warn!(connector = connector.name(), error = %e, "Connector task aborted");
                }
            }
        }

        match types {
            Some(types) if !types.is_empty() => {
                documents.retain(|d| types.iter().any(|t| *t == d.doc_type));
            }
            _ => {}
        }

        tracing::info!(query, count = documents.len(), "Aggregated documents");
        documents
    }
}
