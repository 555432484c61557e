//! Integration tests for multi-source aggregation
//!
//! Connectors here are in-process doubles, so these tests exercise ordering,
//! filtering and failure isolation without any network access.

mod common;

use common::mocks::{DelayedConnector, FailingConnector, PanickingConnector, StaticConnector, doc};
use scout::connectors::{Connector, DorkConnector};
use scout::research::Aggregator;
use scout::types::signal;
use std::sync::{Arc, Mutex};

fn names(docs: &[scout::Document]) -> Vec<String> {
    docs.iter()
        .filter_map(|d| d.display_title().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_failing_connector_is_isolated() {
    let aggregator = Aggregator::new(vec![
        StaticConnector::new(
            "first",
            vec![
                doc("A", signal::SUPPLY, "Alpha"),
                doc("A", signal::MARKET_VELOCITY, "Beta"),
            ],
        ) as Arc<dyn Connector>,
        Arc::new(FailingConnector),
        StaticConnector::new("third", vec![doc("C", signal::SUPPLY, "Gamma")]),
    ]);

    let docs = aggregator.fetch_all("bookkeeping", 10, None).await;
    assert_eq!(names(&docs), vec!["Alpha", "Beta", "Gamma"]);

    let supply = [signal::SUPPLY.to_string()];
    let docs = aggregator.fetch_all("bookkeeping", 10, Some(&supply[..])).await;
    assert_eq!(names(&docs), vec!["Alpha", "Gamma"]);
}

#[tokio::test]
async fn test_panicking_connector_is_isolated() {
    let aggregator = Aggregator::new(vec![
        Arc::new(PanickingConnector) as Arc<dyn Connector>,
        StaticConnector::new("ok", vec![doc("B", signal::TECHNICAL, "Survivor")]),
    ]);

    let docs = aggregator.fetch_all("q", 5, None).await;
    assert_eq!(names(&docs), vec!["Survivor"]);
}

#[tokio::test]
async fn test_filter_preserves_relative_order() {
    let aggregator = Aggregator::new(vec![
        StaticConnector::new(
            "mixed",
            vec![
                doc("A", signal::SOCIAL, "One"),
                doc("A", signal::SUPPLY, "Two"),
                doc("A", signal::SOCIAL, "Three"),
            ],
        ) as Arc<dyn Connector>,
        StaticConnector::new(
            "more",
            vec![
                doc("B", signal::TECHNICAL, "Four"),
                doc("B", signal::SOCIAL, "Five"),
            ],
        ),
    ]);

    let unfiltered = aggregator.fetch_all("q", 10, None).await;
    let types = [signal::SOCIAL.to_string(), signal::TECHNICAL.to_string()];
    let filtered = aggregator.fetch_all("q", 10, Some(&types[..])).await;

    let expected: Vec<_> = unfiltered
        .iter()
        .filter(|d| types.contains(&d.doc_type))
        .cloned()
        .collect();
    assert_eq!(filtered, expected);
    assert_eq!(names(&filtered), vec!["One", "Three", "Four", "Five"]);
}

#[tokio::test]
async fn test_empty_type_filter_keeps_everything() {
    let aggregator = Aggregator::new(vec![
        StaticConnector::new("a", vec![doc("A", signal::SUPPLY, "Alpha")]) as Arc<dyn Connector>,
        Arc::new(DorkConnector),
    ]);

    let all = aggregator.fetch_all("pet insurance", 3, None).await;
    let empty = aggregator.fetch_all("pet insurance", 3, Some(&[][..])).await;
    assert_eq!(all, empty);
    // dork entries are not capped by the limit
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn test_limit_applies_per_connector() {
    let aggregator = Aggregator::new(vec![
        StaticConnector::new(
            "a",
            vec![
                doc("A", signal::SUPPLY, "A1"),
                doc("A", signal::SUPPLY, "A2"),
                doc("A", signal::SUPPLY, "A3"),
            ],
        ) as Arc<dyn Connector>,
        StaticConnector::new(
            "b",
            vec![doc("B", signal::SUPPLY, "B1"), doc("B", signal::SUPPLY, "B2")],
        ),
    ]);

    let docs = aggregator.fetch_all("q", 2, None).await;
    assert_eq!(names(&docs), vec!["A1", "A2", "B1", "B2"]);
}

#[tokio::test]
async fn test_all_connectors_failing_yields_empty() {
    let aggregator = Aggregator::new(vec![
        Arc::new(FailingConnector) as Arc<dyn Connector>,
        Arc::new(PanickingConnector),
    ]);
    assert!(aggregator.fetch_all("q", 5, None).await.is_empty());
}

#[tokio::test]
async fn test_priority_order_survives_completion_order() {
    let finished = Arc::new(Mutex::new(Vec::new()));
    let aggregator = Aggregator::new(vec![
        DelayedConnector::new(
            "slow",
            150,
            vec![
                doc("A", signal::SUPPLY, "Slow One"),
                doc("A", signal::SOCIAL, "Slow Two"),
            ],
            &finished,
        ) as Arc<dyn Connector>,
        DelayedConnector::new(
            "fast",
            0,
            vec![
                doc("B", signal::SOCIAL, "Fast One"),
                doc("B", signal::SUPPLY, "Fast Two"),
            ],
            &finished,
        ),
    ]);

    let docs = aggregator.fetch_all("q", 10, None).await;
    assert_eq!(*finished.lock().unwrap(), vec!["fast", "slow"]);
    assert_eq!(names(&docs), vec!["Slow One", "Slow Two", "Fast One", "Fast Two"]);

    finished.lock().unwrap().clear();
    let social = [signal::SOCIAL.to_string()];
    let docs = aggregator.fetch_all("q", 10, Some(&social[..])).await;
    assert_eq!(*finished.lock().unwrap(), vec!["fast", "slow"]);
    assert_eq!(names(&docs), vec!["Slow Two", "Fast One"]);
}
