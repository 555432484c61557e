//! Pain-point search query templates for a public discussion forum.
//!
//! No network access: the connector returns the queries themselves, to be run
//! later against a search engine.

use super::{Connector, ConnectorError};
use crate::types::{Document, signal};
use async_trait::async_trait;

const SOURCE: &str = "Reddit";

const PAIN_PHRASES: [&str; 4] = [
    "I hate doing",
    "alternative to",
    "willing to pay",
    "why isn't there a",
];

/// Build the fixed set of dork entries for `query`, in template order.
pub fn dorks(query: &str) -> Vec<Document> {
    PAIN_PHRASES
        .iter()
        .map(|phrase| Document {
            dork: Some(format!(r#"site:reddit.com "{}" "{}""#, query, phrase)),
            ..Document::new(SOURCE, signal::SOCIAL)
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DorkConnector;

#[async_trait]
impl Connector for DorkConnector {
    fn name(&self) -> &str {
        "dork"
    }

    // `limit` does not apply: the template set is fixed.
    async fn try_fetch(&self, query: &str, _limit: usize) -> Result<Vec<Document>, ConnectorError> {
        Ok(dorks(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dorks_for_query() {
        let docs = dorks("crm");
        assert_eq!(docs.len(), 4);
        assert_eq!(
            docs[0].dork.as_deref(),
            Some(r#"site:reddit.com "crm" "I hate doing""#)
        );
        assert_eq!(
            docs[3].dork.as_deref(),
            Some(r#"site:reddit.com "crm" "why isn't there a""#)
        );
        assert!(docs.iter().all(|d| d.source == "Reddit" && d.doc_type == signal::SOCIAL));
        assert!(docs.iter().all(|d| d.url.is_none() && d.excerpt().is_none()));
    }

    #[test]
    fn test_empty_query_still_yields_four() {
        let docs = dorks("");
        assert_eq!(docs.len(), 4);
        assert_eq!(
            docs[1].dork.as_deref(),
            Some(r#"site:reddit.com "" "alternative to""#)
        );
    }

    #[tokio::test]
    async fn test_connector_ignores_limit() {
        let docs = DorkConnector.fetch("notes", 1).await;
        assert_eq!(docs.len(), 4);
    }
}
