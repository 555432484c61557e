//! Terminal rendering for `scout ask`.
//!
//! Report tables become aligned text grids and charts become horizontal bar
//! rows. Every helper has a plain variant for `--no-color`.

use crate::types::{ChartSpec, SynthOutput, TableSpec};
use crate::workflows::StageStep;
use owo_colors::OwoColorize;

const BAR_WIDTH: usize = 30;

pub struct Output {
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a table as aligned text lines: header, rule, then rows.
pub fn render_table(table: &TableSpec) -> Vec<String> {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(&table.columns)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(table.rows.iter().map(|row| line(row)));
    lines
}

/// Bar of `width` cells scaled against `max`.
pub fn chart_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the Scout banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}\n",
                "SCOUT".bright_cyan().bold(),
                format!("market intelligence v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\n   SCOUT market intelligence v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print an info line
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "›".blue(), message);
        } else {
            println!("  > {}", message);
        }
    }

    /// Print a warning line to stderr
    pub fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "!".yellow().bold(), message.yellow());
        } else {
            eprintln!("  [WARN] {}", message);
        }
    }

    /// Section title, e.g. "Summary"
    pub fn header(&self, title: &str) {
        let title = title.to_uppercase();
        if self.colored {
            println!("\n  {}", title.bright_white().bold());
        } else {
            println!("\n  {}", title);
        }
    }

    /// Table or chart title
    pub fn subheader(&self, title: &str) {
        let title = if title.trim().is_empty() { "(untitled)" } else { title };
        if self.colored {
            println!("\n  {}", title.cyan());
        } else {
            println!("\n  {}:", title);
        }
    }

    /// Print indented paragraph text
    pub fn paragraph(&self, text: &str) {
        for line in text.lines() {
            println!("    {}", line);
        }
    }

    /// Print a table
    pub fn table(&self, table: &TableSpec) {
        self.subheader(&table.title);
        for (i, line) in render_table(table).iter().enumerate() {
            if self.colored && i == 0 {
                println!("    {}", line.bright_white().bold());
            } else if self.colored && i == 1 {
                println!("    {}", line.dimmed());
            } else {
                println!("    {}", line);
            }
        }
    }

    /// Print a chart as horizontal bars
    pub fn chart(&self, chart: &ChartSpec) {
        self.subheader(&chart.title);
        let max = chart.values.iter().cloned().fold(0.0_f64, f64::max);
        let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        for (label, value) in chart.labels.iter().zip(&chart.values) {
            let bar = chart_bar(*value, max, BAR_WIDTH);
            if self.colored {
                println!(
                    "    {:<width$} {} {}",
                    label,
                    bar.cyan(),
                    value.dimmed(),
                    width = label_width
                );
            } else {
                println!("    {:<width$} {} {}", label, bar, value, width = label_width);
            }
        }
    }

    /// Print a complete pipeline output
    pub fn synth_output(&self, output: &SynthOutput) {
        self.header("Summary");
        self.paragraph(&output.final_summary);

        if !output.recommendations.is_empty() {
            self.header("Recommendations");
            self.paragraph(&output.recommendations);
        }
        for table in &output.tables {
            self.table(table);
        }
        for chart in &output.charts {
            self.chart(chart);
        }
        println!();
    }

    /// Print the per-stage trace
    pub fn steps(&self, steps: &[StageStep]) {
        self.header("Stages");
        for step in steps {
            let status = if step.skipped { "skipped" } else { "ran" };
            let line = format!("{:<18} {:>7} ms  {}", step.stage, step.duration_ms, status);
            if self.colored && step.skipped {
                println!("    {}", line.dimmed());
            } else {
                println!("    {}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let table = TableSpec {
            title: "Players".to_string(),
            columns: vec!["Name".to_string(), "Votes".to_string()],
            rows: vec![
                vec!["Acme Robotics".to_string(), "120".to_string()],
                vec!["Beta".to_string(), "7".to_string()],
            ],
        };

        let lines = render_table(&table);
        assert_eq!(lines[0], "Name          | Votes");
        assert_eq!(lines[1], "--------------+------");
        assert_eq!(lines[2], "Acme Robotics | 120");
        assert_eq!(lines[3], "Beta          | 7");
    }

    #[test]
    fn test_chart_bar_scaling() {
        assert_eq!(chart_bar(10.0, 10.0, 10).chars().count(), 10);
        assert_eq!(chart_bar(5.0, 10.0, 10).chars().count(), 5);
        // small positive values still show one cell
        assert_eq!(chart_bar(0.01, 10.0, 10).chars().count(), 1);
        assert_eq!(chart_bar(0.0, 10.0, 10), "");
        assert_eq!(chart_bar(-3.0, 10.0, 10), "");
    }
}
