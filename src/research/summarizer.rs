use crate::llm::LLMClient;
use crate::types::{Document, Quote, Result, SummaryResult, TopSource};
use crate::utils::parsing::{array_field, parse_or_else, str_field, value_to_text};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Longest quote kept, in words
pub const MAX_QUOTE_WORDS: usize = 25;
/// Most quotes kept in a summary
pub const MAX_QUOTES: usize = 2;
/// Minimum words for a sentence to be picked as a fallback quote
pub const MIN_QUOTE_WORDS: usize = 6;

pub const FALLBACK_NOTES: &str = "Auto-generated summary (fallback parsing).";
const FALLBACK_CREDIBILITY: &str = "High";
const FALLBACK_DOCS: usize = 3;

// ============= Lenient Model Output =============

/// `summary` may be one string or a list; null and empty items are dropped.
fn summary_lines(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .filter(|line| !line.is_empty())
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![value_to_text(other)],
    }
}

/// A quote is either a bare string or an object with a string `text`.
fn quote_from(value: &Value) -> Option<Quote> {
    match value {
        Value::String(text) => Some(Quote {
            text: text.clone(),
            ..Default::default()
        }),
        Value::Object(object) => Some(Quote {
            text: str_field(object, "text")?,
            source_url: str_field(object, "source_url"),
            context: str_field(object, "context"),
        }),
        _ => None,
    }
}

fn top_source_from(value: &Value) -> Option<TopSource> {
    let object = value.as_object()?;
    Some(TopSource {
        title: str_field(object, "title"),
        url: str_field(object, "url"),
        source_type: str_field(object, "type"),
        credibility: str_field(object, "credibility").unwrap_or_default(),
    })
}

// ============= Text Helpers =============

/// Keep the first `max_words` words, appending `...` when anything was cut.
/// Text within the limit is returned unchanged.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    format!("{}...", words[..max_words].join(" "))
}

/// Split after `.`, `!` or `?` when followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|(_, next)| next.is_whitespace())
        {
            let end = idx + c.len_utf8();
            sentences.push(&text[start..end]);
            while chars.peek().is_some_and(|(_, next)| next.is_whitespace()) {
                chars.next();
            }
            start = chars.peek().map_or(text.len(), |(i, _)| *i);
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// First sentence of each document with enough words, up to [`MAX_QUOTES`].
pub fn choose_quotes(docs: &[Document]) -> Vec<Quote> {
    let mut quotes = Vec::new();

    for doc in docs {
        if quotes.len() >= MAX_QUOTES {
            break;
        }
        let Some(text) = doc.full_text.as_deref().or(doc.snippet.as_deref()) else {
            continue;
        };

        let picked = split_sentences(text)
            .into_iter()
            .find(|s| s.split_whitespace().count() >= MIN_QUOTE_WORDS);

        if let Some(sentence) = picked {
            quotes.push(Quote {
                text: truncate_words(sentence, MAX_QUOTE_WORDS),
                source_url: doc.url.clone(),
                context: doc.title.clone(),
            });
        }
    }

    quotes
}

/// Deterministic summary built from the documents alone.
fn fallback_summary(query: &str, payload: &[Document]) -> SummaryResult {
    let label = |doc: &Document| {
        format!(
            "{} - {}",
            doc.title.as_deref().unwrap_or("Untitled"),
            doc.url.as_deref().unwrap_or("no url")
        )
    };

    SummaryResult {
        query: query.to_string(),
        summary: payload.iter().take(FALLBACK_DOCS).map(label).collect(),
        quotes: choose_quotes(payload),
        top_sources: payload
            .iter()
            .take(FALLBACK_DOCS)
            .map(|doc| TopSource {
                title: doc.title.clone(),
                url: doc.url.clone(),
                source_type: Some(doc.doc_type.clone()),
                credibility: FALLBACK_CREDIBILITY.to_string(),
            })
            .collect(),
        guideline_extracts: Vec::new(),
        notes: FALLBACK_NOTES.to_string(),
        documents_used: Vec::new(),
    }
}

fn parsed_summary(query: &str, parsed: &Map<String, Value>) -> SummaryResult {
    SummaryResult {
        query: query.to_string(),
        summary: summary_lines(parsed.get("summary")),
        quotes: array_field(parsed, "quotes")
            .iter()
            .filter_map(quote_from)
            .take(MAX_QUOTES)
            .collect(),
        top_sources: array_field(parsed, "top_sources")
            .iter()
            .filter_map(top_source_from)
            .collect(),
        guideline_extracts: array_field(parsed, "guideline_extracts").to_vec(),
        notes: parsed.get("notes").map(value_to_text).unwrap_or_default(),
        documents_used: Vec::new(),
    }
}

/// Turn raw completion text into a summary, falling back when it is not a
/// JSON object. `payload` holds the canonical documents sent with the
/// request. Quote texts are capped at [`MAX_QUOTE_WORDS`] on both paths.
pub fn summarize_response(query: &str, raw: &str, payload: Vec<Document>) -> SummaryResult {
    let mut result = parse_or_else(
        raw,
        |object: Map<String, Value>| parsed_summary(query, &object),
        |_| fallback_summary(query, &payload),
    );
    result.documents_used = payload;

    for quote in &mut result.quotes {
        quote.text = truncate_words(&quote.text, MAX_QUOTE_WORDS);
    }
    result
}

// ============= Summarizer =============

/// Produces a [`SummaryResult`] from a gathered document set with exactly one
/// completion request.
#[derive(Clone)]
pub struct Summarizer {
    llm: Arc<dyn LLMClient>,
    instructions: String,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LLMClient>, instructions: impl Into<String>) -> Self {
        Self {
            llm,
            instructions: instructions.into(),
        }
    }

    /// Summarize `documents` for `query`.
    ///
    /// # Errors
    ///
    /// A failed completion request is returned as is. Unparseable output is
    /// not an error.
    pub async fn synthesize(&self, query: &str, documents: &[Document]) -> Result<SummaryResult> {
        let payload: Vec<Document> = documents.iter().map(Document::canonical).collect();
        let messages = vec![
            ("system".to_string(), self.instructions.clone()),
            (
                "user".to_string(),
                format!("Create a concise structured summary for the query: {query}"),
            ),
            ("assistant".to_string(), serde_json::to_string(&payload)?),
        ];

        let raw = self.llm.generate_with_history(&messages).await?;
        let result = summarize_response(query, &raw, payload);

        tracing::info!(
            query,
            documents = documents.len(),
            quotes = result.quotes.len(),
            fallback = result.notes == FALLBACK_NOTES,
            "Summary ready"
        );
        Ok(result)
    }
}
