//! Test doubles shared across integration tests.
//!
//! Provides a scripted completion client and a few connectors with fixed
//! behavior, so pipeline tests never touch the network.

#![allow(dead_code)]

use async_trait::async_trait;
use scout::connectors::{Connector, ConnectorError};
use scout::llm::{LLMClient, LLMResponse};
use scout::types::{AppError, Document, Result, ToolCall, ToolDefinition};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted completion reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
    ToolCall(ToolCall),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text(content.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Reply::Fail(message.into())
    }

    pub fn tool(name: &str, arguments: serde_json::Value) -> Self {
        Reply::ToolCall(ToolCall {
            id: "call_1".to_string(),
            name: name.to_string(),
            arguments,
        })
    }
}

/// Completion client that answers calls in order from a script.
///
/// Every call, whatever the method, pops the next reply. An exhausted script
/// answers with an error so unexpected extra calls surface in assertions.
/// The text of every request is recorded for inspection.
#[derive(Clone, Default)]
pub struct ScriptedLLMClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLLMClient {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            prompts: Arc::default(),
        }
    }

    pub fn shared(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self::new(replies))
    }

    /// Requests seen so far, one entry per call.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }

    fn next(&self, prompt: String) -> Reply {
        self.prompts.lock().unwrap().push(prompt);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::fail("script exhausted"))
    }

    fn next_text(&self, prompt: String) -> Result<String> {
        match self.next(prompt) {
            Reply::Text(content) => Ok(content),
            Reply::Fail(message) => Err(AppError::LLM(message)),
            Reply::ToolCall(call) => Ok(call.arguments.to_string()),
        }
    }
}

#[async_trait]
impl LLMClient for ScriptedLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.next_text(prompt.to_string())
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.next_text(format!("{system}\n{prompt}"))
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        let joined = messages
            .iter()
            .map(|(role, content)| format!("{role}: {content}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.next_text(joined)
    }

    async fn generate_with_tools(
        &self,
        system: &str,
        prompt: &str,
        _tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        match self.next(format!("{system}\n{prompt}")) {
            Reply::Text(content) => Ok(LLMResponse {
                content,
                tool_calls: vec![],
                finish_reason: "stop".to_string(),
            }),
            Reply::Fail(message) => Err(AppError::LLM(message)),
            Reply::ToolCall(call) => Ok(LLMResponse {
                content: String::new(),
                tool_calls: vec![call],
                finish_reason: "tool_calls".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Connector returning a fixed set of documents, truncated to the limit.
pub struct StaticConnector {
    pub name: &'static str,
    pub docs: Vec<Document>,
}

impl StaticConnector {
    pub fn new(name: &'static str, docs: Vec<Document>) -> Arc<Self> {
        Arc::new(Self { name, docs })
    }
}

#[async_trait]
impl Connector for StaticConnector {
    fn name(&self) -> &str {
        self.name
    }

    async fn try_fetch(
        &self,
        _query: &str,
        limit: usize,
    ) -> std::result::Result<Vec<Document>, ConnectorError> {
        Ok(self.docs.iter().take(limit).cloned().collect())
    }
}

/// Connector that sleeps before returning its documents and appends its name
/// to `finished` once done.
pub struct DelayedConnector {
    pub name: &'static str,
    pub docs: Vec<Document>,
    pub delay: Duration,
    pub finished: Arc<Mutex<Vec<&'static str>>>,
}

impl DelayedConnector {
    pub fn new(
        name: &'static str,
        delay_ms: u64,
        docs: Vec<Document>,
        finished: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            docs,
            delay: Duration::from_millis(delay_ms),
            finished: Arc::clone(finished),
        })
    }
}

#[async_trait]
impl Connector for DelayedConnector {
    fn name(&self) -> &str {
        self.name
    }

    async fn try_fetch(
        &self,
        _query: &str,
        limit: usize,
    ) -> std::result::Result<Vec<Document>, ConnectorError> {
        tokio::time::sleep(self.delay).await;
        self.finished.lock().unwrap().push(self.name);
        Ok(self.docs.iter().take(limit).cloned().collect())
    }
}

/// Connector that always fails.
pub struct FailingConnector;

#[async_trait]
impl Connector for FailingConnector {
    fn name(&self) -> &str {
        "failing"
    }

    async fn try_fetch(
        &self,
        _query: &str,
        _limit: usize,
    ) -> std::result::Result<Vec<Document>, ConnectorError> {
        Err(ConnectorError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

/// Connector whose fetch panics.
pub struct PanickingConnector;

#[async_trait]
impl Connector for PanickingConnector {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn try_fetch(
        &self,
        _query: &str,
        _limit: usize,
    ) -> std::result::Result<Vec<Document>, ConnectorError> {
        panic!("connector blew up");
    }
}

/// A document with a title and url.
pub fn doc(source: &str, doc_type: &str, title: &str) -> Document {
    let mut doc = Document::new(source, doc_type);
    doc.title = Some(title.to_string());
    doc.url = Some(format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")));
    doc
}
