//! Rendering of API records for the terminal.
//!
//! Lists render as bordered tables with one row per record. Single records
//! render as a two-column `Property | Value` table, with optional per-field
//! [`Formatter`]s for values that need more than plain text.

use crate::client::Record;
use crate::constants::{HOT_VERSION_KEY, TEXT_WRAP_WIDTH};
use crate::error::HeatResult;
use clap::ValueEnum;
use console::measure_text_width;
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Document format for generated templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Custom rendering of a single field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Wrap long text.
    TextWrap,

    /// Pretty-printed JSON.
    Json,

    /// `href (rel)` per link, one per line.
    Links,

    /// List items, one per line.
    NewlineList,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Formatter {
    /// Render `value` with this formatter.
    pub fn apply(&self, value: &Value) -> String {
        match self {
            Formatter::TextWrap => text_wrap(&cell(value), TEXT_WRAP_WIDTH),
            Formatter::Json => json_pretty(value),
            Formatter::Links => format_links(value),
            Formatter::NewlineList => match value {
                Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("\n"),
                other => cell(other),
            },
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Print records as a table of the given fields.
pub fn print_list(records: &[Record], fields: &[&str], sort_by: Option<usize>) {
    println!("{}", format_list(records, fields, sort_by));
}

/// Render records as a table of the given fields, optionally sorted by the
/// field at index `sort_by`.
pub fn format_list(records: &[Record], fields: &[&str], sort_by: Option<usize>) -> String {
    let mut rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| record.get(*field).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    if let Some(index) = sort_by.filter(|i| *i < fields.len()) {
        rows.sort_by(|a, b| a[index].cmp(&b[index]));
    }

    let header: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    render_table(&header, &rows)
}

/// Print a single record as `Property | Value` rows.
pub fn print_dict(record: &Record, formatters: &[(&str, Formatter)]) {
    println!("{}", format_dict(record, formatters));
}

/// Render a single record as `Property | Value` rows sorted by property.
pub fn format_dict(record: &Record, formatters: &[(&str, Formatter)]) -> String {
    let mut rows: Vec<Vec<String>> = record
        .iter()
        .map(|(key, value)| {
            let rendered = formatters
                .iter()
                .find(|(field, _)| *field == key.as_str())
                .map(|(_, formatter)| formatter.apply(value))
                .unwrap_or_else(|| cell(value));
            vec![key.clone(), rendered]
        })
        .collect();
    rows.sort_by(|a, b| a[0].cmp(&b[0]));

    render_table(&["Property".to_string(), "Value".to_string()], &rows)
}

/// Render a document as JSON or YAML.
pub fn format_output(value: &Value, format: OutputFormat) -> HeatResult<String> {
    match format {
        OutputFormat::Json => Ok(json_pretty(value)),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// Render a stack template: HOT templates as YAML, anything else as JSON.
pub fn format_template(template: &Value) -> HeatResult<String> {
    if template.get(HOT_VERSION_KEY).is_some() {
        format_output(template, OutputFormat::Yaml)
    } else {
        format_output(template, OutputFormat::Json)
    }
}

/// Pretty-print JSON with two-space indentation.
pub fn json_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn text_wrap(text: &str, width: usize) -> String {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && measure_text_width(&line) + 1 + measure_text_width(word) > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Render API links as `href (rel)` lines.
fn format_links(value: &Value) -> String {
    let Value::Array(links) = value else {
        return cell(value);
    };

    links
        .iter()
        .map(|link| {
            let field = |name: &str| link.get(name).and_then(Value::as_str).unwrap_or("");
            format!("{} ({})", field("href"), field("rel"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text of a value: strings as they are, null as nothing, everything
/// else as compact JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            let widest = value.lines().map(measure_text_width).max().unwrap_or(0);
            widths[i] = widths[i].max(widest);
        }
    }

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+", border);

    let mut out = vec![border.clone()];
    out.extend(render_row(header, &widths));
    out.push(border.clone());
    for row in rows {
        out.extend(render_row(row, &widths));
    }
    out.push(border);

    out.join("\n")
}

fn render_row(row: &[String], widths: &[usize]) -> Vec<String> {
    let cells: Vec<Vec<&str>> = row.iter().map(|v| v.lines().collect()).collect();
    let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);

    (0..height)
        .map(|line| {
            let parts: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(lines, width)| {
                    let text = lines.get(line).copied().unwrap_or("");
                    let pad = width - measure_text_width(text);
                    format!(" {}{} ", text, " ".repeat(pad))
                })
                .collect();
            format!("|{}|", parts.join("|"))
        })
        .collect()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
