//! Turns completion text into a [`SynthOutput`].
//!
//! Structured responses are read field by field and repaired where possible;
//! anything else becomes a text-only output carrying the raw response.

use crate::types::{ChartSpec, SynthOutput, TableSpec};
use crate::utils::parsing::{array_field, parse_or_else, value_to_text};
use serde_json::{Map, Value};

/// Finite number from a JSON number or numeric string.
fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|v: &f64| v.is_finite())
}

/// Table with every row resized to the column count. Tables without columns
/// are dropped.
fn repair_table(value: &Value) -> Option<TableSpec> {
    let raw = value.as_object()?;
    let columns: Vec<String> = array_field(raw, "columns").iter().map(value_to_text).collect();
    if columns.is_empty() {
        return None;
    }

    let width = columns.len();
    let rows = array_field(raw, "rows")
        .iter()
        .filter_map(Value::as_array)
        .map(|row| {
            let mut cells: Vec<String> = row.iter().take(width).map(value_to_text).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();

    Some(TableSpec {
        title: raw.get("title").map(value_to_text).unwrap_or_default(),
        columns,
        rows,
    })
}

/// Chart truncated to matching label/value lengths. A value that is not a
/// finite number drops the chart.
fn repair_chart(value: &Value) -> Option<ChartSpec> {
    let raw = value.as_object()?;
    let labels = array_field(raw, "labels");
    let values = array_field(raw, "values");
    let len = labels.len().min(values.len());

    let values = values
        .iter()
        .take(len)
        .map(to_number)
        .collect::<Option<Vec<f64>>>()?;

    Some(ChartSpec {
        title: raw.get("title").map(value_to_text).unwrap_or_default(),
        labels: labels.iter().take(len).map(value_to_text).collect(),
        values,
    })
}

fn structured(raw: &str, parsed: Map<String, Value>) -> SynthOutput {
    let tables_seen = array_field(&parsed, "tables");
    let charts_seen = array_field(&parsed, "charts");
    let tables: Vec<TableSpec> = tables_seen.iter().filter_map(repair_table).collect();
    let charts: Vec<ChartSpec> = charts_seen.iter().filter_map(repair_chart).collect();

    if tables.len() < tables_seen.len() || charts.len() < charts_seen.len() {
        tracing::warn!(
            dropped_tables = tables_seen.len() - tables.len(),
            dropped_charts = charts_seen.len() - charts.len(),
            "Dropped malformed tables or charts"
        );
    }

    let final_summary = match parsed.get("final_summary") {
        Some(value) if !value.is_null() => value_to_text(value),
        _ => raw.trim().to_string(),
    };

    SynthOutput {
        final_summary,
        recommendations: parsed
            .get("recommendations")
            .map(value_to_text)
            .unwrap_or_default(),
        tables,
        charts,
    }
}

/// Parse a completion response into a [`SynthOutput`].
///
/// A structured response without `final_summary` keeps the raw text as the
/// summary. An unstructured response yields the raw text with
/// `fallback_recommendations`.
pub fn assemble(raw: &str, fallback_recommendations: &str) -> SynthOutput {
    parse_or_else(
        raw,
        |parsed: Map<String, Value>| structured(raw, parsed),
        |text| SynthOutput::text(text.trim(), fallback_recommendations),
    )
}
