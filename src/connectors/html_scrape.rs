//! Hackathon gallery connector: a search page, then one detail page per hit.
//!
//! `scraper::Html` is not `Send`, so all parsing happens in the synchronous
//! helpers below and only owned strings cross an `.await`.

use super::{Connector, ConnectorError, http_client};
use crate::types::{Document, signal};
use async_trait::async_trait;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

const SOURCE: &str = "Devpost";

const RESULT_LINK: &str = ".link-to-software";
const TITLE: &str = "#app-title";
const TAGLINE: &str = ".large.mb-4";
const BUILT_WITH: &str = "#built-with li";

fn selector(css: &str) -> Result<Selector, ConnectorError> {
    Selector::parse(css).map_err(|e| ConnectorError::Parse(format!("selector {css}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Detail-page links from a search-results page, resolved against `page_url`.
fn extract_result_links(html: &str, page_url: &Url, limit: usize) -> Result<Vec<String>, ConnectorError> {
    let document = Html::parse_document(html);
    let links = selector(RESULT_LINK)?;

    Ok(document
        .select(&links)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| page_url.join(href).ok())
        .map(String::from)
        .take(limit)
        .collect())
}

/// Project fields scraped from one detail page.
#[derive(Debug, Clone, PartialEq)]
struct ProjectPage {
    title: String,
    tagline: String,
    built_with: Vec<String>,
}

fn parse_project_page(html: &str) -> Result<ProjectPage, ConnectorError> {
    let document = Html::parse_document(html);
    let (title, tagline, built_with) = (selector(TITLE)?, selector(TAGLINE)?, selector(BUILT_WITH)?);

    Ok(ProjectPage {
        title: document
            .select(&title)
            .next()
            .map(element_text)
            .unwrap_or_else(|| "Unknown".to_string()),
        tagline: document
            .select(&tagline)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        built_with: document
            .select(&built_with)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect(),
    })
}

pub struct DevpostConnector {
    base_url: String,
    user_agent: String,
}

impl DevpostConnector {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    fn search_url(&self, query: &str) -> Result<Url, ConnectorError> {
        let mut url = Url::parse(&self.base_url)
            .and_then(|base| base.join("/software/search"))
            .map_err(|e| ConnectorError::Configuration(format!("invalid base url: {e}")))?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }

    async fn fetch_project(&self, client: &reqwest::Client, link: &str) -> Result<Document, ConnectorError> {
        let response = client.get(link).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Status {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let page = parse_project_page(&response.text().await?)?;
        Ok(Document {
            name: Some(page.title),
            tagline: Some(page.tagline),
            tech_stack: page.built_with,
            url: Some(link.to_string()),
            ..Document::new(SOURCE, signal::TECHNICAL)
        })
    }
}

#[async_trait]
impl Connector for DevpostConnector {
    fn name(&self) -> &str {
        "html"
    }

    async fn try_fetch(&self, query: &str, limit: usize) -> Result<Vec<Document>, ConnectorError> {
        let client = http_client(&self.user_agent)?;
        let search_url = self.search_url(query)?;

        let response = client.get(search_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let links = extract_result_links(&response.text().await?, &search_url, limit)?;
        tracing::debug!(count = links.len(), "Devpost result links");

        let mut projects = Vec::with_capacity(links.len());
        for link in &links {
            match self.fetch_project(&client, link).await {
                Ok(doc) => projects.push(doc),
                Err(e) => tracing::debug!(url = %link, error = %e, "Skipping project page"),
            }
        }

        Ok(projects)
    }
}
