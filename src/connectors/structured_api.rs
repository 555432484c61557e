//! Launch-platform connector backed by a GraphQL API.

use super::{Connector, ConnectorError, http_client};
use crate::types::{Document, signal};
use async_trait::async_trait;
use serde::Deserialize;

const SOURCE: &str = "Product Hunt";

/// Placeholder shipped in sample environment files. Treated as "no token".
pub const TOKEN_SENTINEL: &str = "YOUR_PRODUCT_HUNT_DEVELOPER_TOKEN";

const POSTS_QUERY: &str = r#"{
  posts(first: %LIMIT%, order: VOTES_COUNT) {
    edges {
      node {
        name
        tagline
        description
        votesCount
        commentsCount
        website
        topics { edges { node { name } } }
      }
    }
  }
}"#;

// ============= Wire Types =============

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<PostsData>,
}

#[derive(Debug, Deserialize)]
struct PostsData {
    #[serde(default)]
    posts: Option<Connection<PostNode>>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostNode {
    name: String,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    votes_count: u64,
    #[serde(default)]
    comments_count: u64,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    topics: Option<Connection<TopicNode>>,
}

#[derive(Debug, Deserialize)]
struct TopicNode {
    name: String,
}

impl From<PostNode> for Document {
    fn from(node: PostNode) -> Self {
        let tags = node
            .topics
            .map(|t| t.edges.into_iter().map(|e| e.node.name).collect())
            .unwrap_or_default();

        Document {
            name: Some(node.name),
            tagline: node.tagline,
            description: node.description,
            metrics: Some(format!(
                "{} votes, {} comments",
                node.votes_count, node.comments_count
            )),
            tags,
            url: node.website,
            ..Document::new(SOURCE, signal::MARKET_VELOCITY)
        }
    }
}

// ============= Connector =============

/// Top launches ordered by votes. The query string is not part of the request:
/// the platform only exposes a popularity-ordered feed.
pub struct ProductHuntConnector {
    api_url: String,
    token: Option<String>,
    user_agent: String,
}

impl ProductHuntConnector {
    pub fn new(api_url: impl Into<String>, token: Option<String>, user_agent: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token,
            user_agent: user_agent.into(),
        }
    }

    fn usable_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty() && *t != TOKEN_SENTINEL)
    }
}

#[async_trait]
impl Connector for ProductHuntConnector {
    fn name(&self) -> &str {
        "structured_api"
    }

    async fn try_fetch(&self, _query: &str, limit: usize) -> Result<Vec<Document>, ConnectorError> {
        let Some(token) = self.usable_token() else {
            tracing::warn!("Product Hunt API token missing, skipping");
            return Ok(Vec::new());
        };

        let body = serde_json::json!({
            "query": POSTS_QUERY.replace("%LIMIT%", &limit.to_string()),
        });

        let response = http_client(&self.user_agent)?
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::Parse(e.to_string()))?;

        let docs = parsed
            .data
            .and_then(|d| d.posts)
            .map(|posts| posts.edges.into_iter().map(|e| Document::from(e.node)).collect())
            .unwrap_or_default();

        Ok(docs)
    }
}
