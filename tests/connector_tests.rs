//! Integration tests for the HTTP-backed connectors
//!
//! Remote services are replaced by a local wiremock server.

use scout::connectors::structured_api::TOKEN_SENTINEL;
use scout::connectors::{Connector, DevpostConnector, DorkConnector, ProductHuntConnector};
use scout::types::signal;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "Mozilla/5.0 (test)";

fn graphql_body() -> serde_json::Value {
    json!({
        "data": {
            "posts": {
                "edges": [
                    {
                        "node": {
                            "name": "LedgerBot",
                            "tagline": "Bookkeeping on autopilot",
                            "description": "Reconciles bank feeds for freelancers.",
                            "votesCount": 412,
                            "commentsCount": 38,
                            "website": "https://ledgerbot.example",
                            "topics": {"edges": [{"node": {"name": "Fintech"}}]}
                        }
                    },
                    {
                        "node": {
                            "name": "Receiptly",
                            "tagline": "Snap receipts",
                            "votesCount": 95,
                            "commentsCount": 4
                        }
                    }
                ]
            }
        }
    })
}

#[tokio::test]
async fn test_product_hunt_normalizes_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/api/graphql"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_body()))
        .expect(1)
        .mount(&server)
        .await;

    let connector = ProductHuntConnector::new(
        format!("{}/v2/api/graphql", server.uri()),
        Some("secret-token".to_string()),
        UA,
    );
    let docs = connector.fetch("bookkeeping", 2).await;

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].name.as_deref(), Some("LedgerBot"));
    assert_eq!(docs[0].doc_type, signal::MARKET_VELOCITY);
    assert_eq!(docs[0].metrics.as_deref(), Some("412 votes, 38 comments"));
    assert_eq!(docs[0].tags, vec!["Fintech"]);
    assert_eq!(docs[0].url.as_deref(), Some("https://ledgerbot.example"));
    assert_eq!(docs[1].name.as_deref(), Some("Receiptly"));
    assert!(docs[1].url.is_none());
}

#[tokio::test]
async fn test_product_hunt_request_carries_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"posts": {"edges": []}}})))
        .mount(&server)
        .await;

    let connector = ProductHuntConnector::new(server.uri(), Some("t".to_string()), UA);
    assert!(connector.fetch("q", 7).await.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let query = body["query"].as_str().unwrap();
    assert!(query.contains("posts(first: 7, order: VOTES_COUNT)"));
}

#[tokio::test]
async fn test_product_hunt_non_200_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let connector = ProductHuntConnector::new(server.uri(), Some("bad".to_string()), UA);
    assert!(connector.fetch("q", 5).await.is_empty());

    let err = connector.try_fetch("q", 5).await.unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_product_hunt_without_token_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_body()))
        .expect(0)
        .mount(&server)
        .await;

    for token in [None, Some(TOKEN_SENTINEL.to_string())] {
        let connector = ProductHuntConnector::new(server.uri(), token, UA);
        assert!(connector.fetch("q", 5).await.is_empty());
    }
    // expectation of zero calls is verified when the server drops
}

#[tokio::test]
async fn test_devpost_skips_failing_detail_page() {
    let server = MockServer::start().await;
    let search = r#"
        <div class="gallery">
          <a class="link-to-software" href="/software/alpha">Alpha</a>
          <a class="link-to-software" href="/software/broken">Broken</a>
          <a class="link-to-software" href="/software/gamma">Gamma</a>
        </div>
    "#;
    Mock::given(method("GET"))
        .and(path("/software/search"))
        .and(query_param("query", "budget app"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/software/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h1 id="app-title">Alpha Budget</h1>
               <p class="large mb-4">Budgets from chat</p>
               <div id="built-with"><ul><li>python</li><li>openai</li></ul></div>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/software/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/software/gamma"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>empty</body></html>"))
        .mount(&server)
        .await;

    let connector = DevpostConnector::new(server.uri(), UA);
    let docs = connector.fetch("budget app", 5).await;

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].name.as_deref(), Some("Alpha Budget"));
    assert_eq!(docs[0].tagline.as_deref(), Some("Budgets from chat"));
    assert_eq!(docs[0].tech_stack, vec!["python", "openai"]);
    assert_eq!(docs[0].doc_type, signal::TECHNICAL);
    assert_eq!(
        docs[0].url.as_deref(),
        Some(format!("{}/software/alpha", server.uri()).as_str())
    );
    assert_eq!(docs[1].name.as_deref(), Some("Unknown"));
}

#[tokio::test]
async fn test_devpost_respects_limit() {
    let server = MockServer::start().await;
    let search = r#"
        <a class="link-to-software" href="/software/one">1</a>
        <a class="link-to-software" href="/software/two">2</a>
    "#;
    Mock::given(method("GET"))
        .and(path("/software/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/software/one"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<h1 id="app-title">One</h1>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/software/two"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let connector = DevpostConnector::new(server.uri(), UA);
    let docs = connector.fetch("q", 1).await;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name.as_deref(), Some("One"));
}

#[tokio::test]
async fn test_devpost_search_failure_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let connector = DevpostConnector::new(server.uri(), UA);
    assert!(connector.fetch("q", 3).await.is_empty());
}

#[tokio::test]
async fn test_dork_connector_is_idempotent() {
    let connector = DorkConnector;
    let first = connector.fetch("pet insurance", 1).await;
    let second = connector.fetch("pet insurance", 1).await;

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    assert!(first.iter().all(|d| d.url.is_none() && d.dork.is_some()));
    assert!(first.iter().all(|d| d.doc_type == signal::SOCIAL));
}
