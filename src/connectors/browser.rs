//! Startup directory connector driven by a headless browser.
//!
//! The directory renders results client-side and loads more on scroll, so the
//! connector repeats extract, dedupe, scroll and wait until the page stops
//! growing or `limit` cards are collected. The session runs on its own task
//! under a wall-clock budget; the calling stage awaits it.

use super::{Connector, ConnectorError};
use crate::types::{Document, signal};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

const SOURCE: &str = "Y Combinator";

/// Card selectors, most specific first.
pub const CARD_SELECTORS: [&str; 2] = ["a._company_86jzd_338", r#"a[href^="/companies/"]"#];
pub const NAME_SELECTOR: &str = ".coName";
pub const DESCRIPTION_SELECTOR: &str = ".coDescription";
pub const BATCH_SELECTOR: &str = ".coBatch";

/// One rendered result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedCard {
    pub name: String,
    pub description: String,
    pub batch: String,
    pub href: String,
}

/// Opened browser page. Implementations hold the real automation engine.
#[async_trait]
pub trait BrowserSession: Send {
    async fn goto(&mut self, url: &str) -> Result<(), ConnectorError>;

    /// Every result card currently rendered. Cards missing a required field are skipped.
    async fn extract_cards(&mut self) -> Result<Vec<ScrapedCard>, ConnectorError>;

    async fn scroll_to_bottom(&mut self) -> Result<(), ConnectorError>;

    async fn page_height(&mut self) -> Result<i64, ConnectorError>;

    async fn close(&mut self) -> Result<(), ConnectorError>;
}

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, user_agent: &str, headless: bool)
    -> Result<Box<dyn BrowserSession>, ConnectorError>;
}

/// Scroll-loop settings.
#[derive(Debug, Clone)]
pub struct ScrollSettings {
    pub base_url: String,
    pub user_agent: String,
    pub scroll_delay: Duration,
    pub timeout: Duration,
    pub headless: bool,
}

pub struct BrowserConnector {
    launcher: Arc<dyn BrowserLauncher>,
    settings: ScrollSettings,
}

impl BrowserConnector {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, settings: ScrollSettings) -> Self {
        Self { launcher, settings }
    }

    /// Connector backed by a local Chromium install.
    #[cfg(feature = "browser")]
    pub fn chromium(settings: ScrollSettings) -> Self {
        Self::new(Arc::new(chromium::ChromiumLauncher), settings)
    }

    /// Without the `browser` feature every fetch reports a configuration error.
    #[cfg(not(feature = "browser"))]
    pub fn chromium(settings: ScrollSettings) -> Self {
        Self::new(Arc::new(UnavailableLauncher), settings)
    }

    fn search_url(&self, query: &str) -> Result<Url, ConnectorError> {
        let mut url = Url::parse(&self.settings.base_url)
            .and_then(|base| base.join("/companies"))
            .map_err(|e| ConnectorError::Configuration(format!("invalid base url: {e}")))?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }
}

#[cfg(not(feature = "browser"))]
struct UnavailableLauncher;

#[cfg(not(feature = "browser"))]
#[async_trait]
impl BrowserLauncher for UnavailableLauncher {
    async fn launch(
        &self,
        _user_agent: &str,
        _headless: bool,
    ) -> Result<Box<dyn BrowserSession>, ConnectorError> {
        Err(ConnectorError::Configuration(
            "scout was built without the `browser` feature".to_string(),
        ))
    }
}

/// Collect up to `limit` unique cards, scrolling until the page stops growing.
async fn scroll_and_collect(
    session: &mut dyn BrowserSession,
    url: &str,
    limit: usize,
    delay: Duration,
) -> Result<Vec<ScrapedCard>, ConnectorError> {
    session.goto(url).await?;

    let mut collected: Vec<ScrapedCard> = Vec::new();
    let mut previous_height = 0;

    while collected.len() < limit {
        for card in session.extract_cards().await? {
            if collected.len() >= limit {
                break;
            }
            if !collected.iter().any(|c| c.name == card.name) {
                collected.push(card);
            }
        }
        if collected.len() >= limit {
            break;
        }

        session.scroll_to_bottom().await?;
        tokio::time::sleep(delay).await;

        let height = session.page_height().await?;
        if height == previous_height {
            break;
        }
        previous_height = height;
    }

    Ok(collected)
}

fn card_to_document(base: &Url, card: ScrapedCard) -> Document {
    Document {
        url: base.join(&card.href).ok().map(String::from),
        name: Some(card.name),
        description: Some(card.description),
        batch: Some(card.batch),
        ..Document::new(SOURCE, signal::SUPPLY)
    }
}

#[async_trait]
impl Connector for BrowserConnector {
    fn name(&self) -> &str {
        "browser"
    }

    async fn try_fetch(&self, query: &str, limit: usize) -> Result<Vec<Document>, ConnectorError> {
        let url = self.search_url(query)?;
        tracing::debug!(url = %url, limit, "Starting browser session");

        let launcher = Arc::clone(&self.launcher);
        let settings = self.settings.clone();
        let target = url.to_string();

        let mut task = tokio::spawn(async move {
            let mut session = launcher.launch(&settings.user_agent, settings.headless).await?;
            let result = scroll_and_collect(session.as_mut(), &target, limit, settings.scroll_delay).await;
            if let Err(e) = session.close().await {
                tracing::debug!(error = %e, "Browser close failed");
            }
            result
        });

        let cards = match tokio::time::timeout(self.settings.timeout, &mut task).await {
            Ok(joined) => joined??,
            Err(_) => {
                task.abort();
                return Err(ConnectorError::Timeout(self.settings.timeout.as_secs()));
            }
        };

        Ok(cards.into_iter().map(|card| card_to_document(&url, card)).collect())
    }
}

#[cfg(feature = "browser")]
pub mod chromium {
    //! [`BrowserLauncher`] backed by chromiumoxide.

    use super::*;
    use chromiumoxide::element::Element;
    use chromiumoxide::{Browser, BrowserConfig, Page};
    use futures::StreamExt;
    use tokio::task::JoinHandle;

    fn browser_err(e: impl std::fmt::Display) -> ConnectorError {
        ConnectorError::Browser(e.to_string())
    }

    pub struct ChromiumLauncher;

    #[async_trait]
    impl BrowserLauncher for ChromiumLauncher {
        async fn launch(
            &self,
            user_agent: &str,
            headless: bool,
        ) -> Result<Box<dyn BrowserSession>, ConnectorError> {
            let mut builder = BrowserConfig::builder().arg(format!("--user-agent={user_agent}"));
            if !headless {
                builder = builder.with_head();
            }
            let config = builder.build().map_err(browser_err)?;

            let (browser, mut handler) = Browser::launch(config).await.map_err(browser_err)?;
            let events = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser.new_page("about:blank").await.map_err(browser_err)?;

            Ok(Box::new(ChromiumSession {
                browser,
                page,
                events,
            }))
        }
    }

    pub struct ChromiumSession {
        browser: Browser,
        page: Page,
        events: JoinHandle<()>,
    }

    async fn child_text(card: &Element, selector: &str) -> Option<String> {
        let element = card.find_element(selector).await.ok()?;
        element
            .inner_text()
            .await
            .ok()
            .flatten()
            .map(|t| t.trim().to_string())
    }

    async fn read_card(card: &Element) -> Option<ScrapedCard> {
        let name = child_text(card, NAME_SELECTOR).await?;
        let description = child_text(card, DESCRIPTION_SELECTOR).await?;
        let batch = child_text(card, BATCH_SELECTOR)
            .await
            .unwrap_or_else(|| "Unknown".to_string());
        let href = card.attribute("href").await.ok().flatten()?;

        Some(ScrapedCard {
            name,
            description,
            batch,
            href,
        })
    }

    #[async_trait]
    impl BrowserSession for ChromiumSession {
        async fn goto(&mut self, url: &str) -> Result<(), ConnectorError> {
            self.page.goto(url).await.map_err(browser_err)?;
            self.page.wait_for_navigation().await.map_err(browser_err)?;
            Ok(())
        }

        async fn extract_cards(&mut self) -> Result<Vec<ScrapedCard>, ConnectorError> {
            let mut elements = Vec::new();
            for selector in CARD_SELECTORS {
                elements = self.page.find_elements(selector).await.unwrap_or_default();
                if !elements.is_empty() {
                    break;
                }
            }

            let mut cards = Vec::with_capacity(elements.len());
            for element in &elements {
                if let Some(card) = read_card(element).await {
                    cards.push(card);
                }
            }
            Ok(cards)
        }

        async fn scroll_to_bottom(&mut self) -> Result<(), ConnectorError> {
            self.page
                .evaluate("window.scrollTo(0, document.body.scrollHeight)")
                .await
                .map_err(browser_err)?;
            Ok(())
        }

        async fn page_height(&mut self) -> Result<i64, ConnectorError> {
            self.page
                .evaluate("document.body.scrollHeight")
                .await
                .map_err(browser_err)?
                .into_value::<i64>()
                .map_err(browser_err)
        }

        async fn close(&mut self) -> Result<(), ConnectorError> {
            self.browser.close().await.map_err(browser_err)?;
            let _ = self.browser.wait().await;
            self.events.abort();
            Ok(())
        }
    }
}
