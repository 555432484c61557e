//! Best-effort parsing of semi-structured completion output.
//!
//! Completion responses often, but not reliably, carry JSON: sometimes inside
//! a fenced code block, sometimes surrounded by prose, sometimes not at all.
//! [`parse_structured`] tries the strict readings in order and returns `None`
//! when none applies; [`parse_or_else`] pairs it with a deterministic fallback
//! so callers always end up with a structurally valid value. The field readers
//! treat null or mistyped fields as absent instead of failing the whole reply.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```(?:json)?\s*(.+?)\s*```").expect("code fence pattern is valid")
});

/// Strip a fenced code block, returning its trimmed body.
///
/// Text without a fence is returned trimmed.
pub fn unwrap_codeblock(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim(),
        None => text.trim(),
    }
}

/// Slice from the first `{` to the last `}`, if both exist in that order.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse structured content out of a completion response.
///
/// Tries, in order: the fenced block body (or the whole trimmed text), then the
/// outermost `{...}` slice of it.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let cleaned = unwrap_codeblock(raw);
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<T>(cleaned) {
        return Some(value);
    }

    extract_json_object(cleaned).and_then(|slice| serde_json::from_str::<T>(slice).ok())
}

/// Strict parse, handing the value to `parsed`, or the raw text to
/// `fallback` when no structured reading applies.
pub fn parse_or_else<T, R>(
    raw: &str,
    parsed: impl FnOnce(T) -> R,
    fallback: impl FnOnce(&str) -> R,
) -> R
where
    T: DeserializeOwned,
{
    match parse_structured(raw) {
        Some(value) => parsed(value),
        None => {
            tracing::debug!("Completion output is not structured, using fallback");
            fallback(raw)
        }
    }
}

/// Render any JSON value as display text. Lists become one item per line.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

/// String field of a JSON object, `None` when absent, null or not a string.
pub fn str_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Items of an array field; absent, null or non-array fields read as empty.
pub fn array_field<'a>(object: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match object.get(key) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}
