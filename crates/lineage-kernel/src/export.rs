//! Presentation of a [`LabelingResult`]: JSON payload, delimited table and
//! an aligned plain-text table.

use crate::family::PersonId;
use crate::labeling::{EntryKind, LabelingResult, ResultKey};
use crate::style::NumberingStyle;
use serde::Serialize;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSummary {
    pub id: String,
    pub name: String,
}

impl StyleSummary {
    pub fn of(style: &dyn NumberingStyle) -> Self {
        Self {
            id: style.id().to_string(),
            name: style.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub key: String,
    pub kind: EntryKind,
    pub name: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
}

/// JSON shape of one labeling run, entries in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelingExport {
    pub style: StyleSummary,
    pub ancestor: String,
    pub entries: Vec<ExportEntry>,
}

impl LabelingExport {
    pub fn new(style: &dyn NumberingStyle, ancestor: &PersonId, result: &LabelingResult) -> Self {
        let entries = result
            .iter()
            .map(|(key, entry)| ExportEntry {
                key: key.to_string(),
                kind: key.kind(),
                name: entry.name.clone(),
                label: entry.label.clone(),
                person: key.person().map(|id| id.to_string()),
                union: key.union().map(|id| id.to_string()),
                slot: match key {
                    ResultKey::MissingChild { slot, .. } => Some(*slot),
                    _ => None,
                },
            })
            .collect();
        Self {
            style: StyleSummary::of(style),
            ancestor: ancestor.to_string(),
            entries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedOptions {
    pub delimiter: char,
    pub header: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header: true,
        }
    }
}

const COLUMNS: [&str; 3] = ["key", "name", "label"];

/// Render `key,name,label` rows. Fields containing the delimiter, a quote
/// or a line break are quoted; embedded quotes are doubled.
pub fn to_delimited(result: &LabelingResult, options: DelimitedOptions) -> String {
    let mut text = String::new();
    if options.header {
        push_row(&mut text, options.delimiter, COLUMNS);
    }
    for (key, entry) in result.iter() {
        let key = key.to_string();
        push_row(
            &mut text,
            options.delimiter,
            [
                key.as_str(),
                entry.name.as_deref().unwrap_or(""),
                entry.label.as_str(),
            ],
        );
    }
    text
}

/// Stream the delimited rendering into `out`.
pub fn write_delimited<W: io::Write>(
    result: &LabelingResult,
    options: DelimitedOptions,
    mut out: W,
) -> io::Result<()> {
    out.write_all(to_delimited(result, options).as_bytes())?;
    out.flush()
}

fn push_row(line: &mut String, delimiter: char, fields: [&str; 3]) {
    for (position, field) in fields.iter().enumerate() {
        if position > 0 {
            line.push(delimiter);
        }
        line.push_str(&quote_field(field, delimiter));
    }
    line.push_str("\r\n");
}

fn quote_field(field: &str, delimiter: char) -> String {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');
    if !needs_quotes {
        return field.to_string();
    }
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Human-readable table: label, name and key columns, left aligned.
pub fn to_table(result: &LabelingResult) -> String {
    let rows: Vec<[String; 3]> = result
        .iter()
        .map(|(key, entry)| {
            [
                entry.label.clone(),
                entry.name.clone().unwrap_or_else(|| "-".to_string()),
                key.to_string(),
            ]
        })
        .collect();

    let mut widths = ["LABEL".len(), "NAME".len()];
    for row in &rows {
        widths[0] = widths[0].max(row[0].chars().count());
        widths[1] = widths[1].max(row[1].chars().count());
    }

    let mut out = format!(
        "{:<w0$}  {:<w1$}  KEY\n",
        "LABEL",
        "NAME",
        w0 = widths[0],
        w1 = widths[1]
    );
    for [label, name, key] in rows {
        out.push_str(&format!(
            "{label:<w0$}  {name:<w1$}  {key}\n",
            w0 = widths[0],
            w1 = widths[1]
        ));
    }
    out
}
