// src/extract/mod.rs

use std::cmp::Ordering;

use tracing::warn;

use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::table::layout::TableLayout;
use crate::table::{Cell, RawTable, METADATA_ROWS};

/// One data row normalized for rendering: values stably sorted, labels
/// composed, colors resolved. The three sequences are always the same length
/// and carry the same permutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartUnit {
    pub title: String,
    pub subtitle: String,
    pub ascending: bool,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    pub colors: Vec<String>,
    pub file_name: String,
}

/// One surviving column of a data row, with its metadata aligned.
struct Entry {
    value: f64,
    header: String,
    subheader: String,
    color: Option<String>,
    bold: bool,
}

/// Extract the chart unit for data row `row`.
///
/// Columns whose value cell is missing (or not numeric) are dropped from
/// the series with a warning; a row with no usable values yields an empty
/// unit, which renders as an empty chart rather than failing.
pub fn chart_unit(
    table: &RawTable,
    layout: &TableLayout,
    row: usize,
    cfg: &ChartConfig,
) -> Result<ChartUnit, ChartError> {
    if row < METADATA_ROWS || row >= table.row_count() {
        return Err(ChartError::DataShape(format!(
            "row {row} is not a data row (table has {} rows)",
            table.row_count()
        )));
    }

    let title = table.cell(row, 0).text();
    let subtitle = table.cell(row, 1).text();
    // The sort direction is embedded in the subtitle wording, not in the
    // numbers: the lower-is-better keyword flips to a descending sort.
    let ascending = !subtitle.contains(&cfg.lower_keyword);

    let mut entries = Vec::new();
    for col in layout.data_start()..table.column_count() {
        let value = match table.cell(row, col).as_f64() {
            Some(v) => v,
            None => {
                if !table.cell(row, col).is_empty() {
                    warn!(row, col, "non-numeric value cell, dropping column");
                }
                continue;
            }
        };
        let color = match table.cell(1, col) {
            Cell::Empty => None,
            cell => Some(cell.text()),
        };
        let subheader = match cfg.subheader_row {
            Some(r) => table.cell(r, col).text(),
            None => String::new(),
        };
        entries.push(Entry {
            value,
            header: table.header(col),
            subheader,
            color,
            bold: table.cell(2, col).as_f64() == Some(1.0),
        });
    }

    // Vec::sort_by is stable, so ties keep encounter order in both
    // directions.
    entries.sort_by(|a, b| {
        let ord = a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    let labels = compose_labels(&entries);
    let colors = entries
        .iter()
        .map(|e| resolve_color(e.color.as_deref(), &cfg.default_color))
        .collect();

    Ok(ChartUnit {
        title,
        subtitle,
        ascending,
        values: entries.iter().map(|e| e.value).collect(),
        labels,
        colors,
        file_name: layout.file_name(row)?.to_string(),
    })
}

/// Compose one label per entry.
///
/// When every subheader is identical none were really provided, so labels
/// are header-only; otherwise each label gets the subheader as a second
/// line. The bold flag wraps the header portion only.
fn compose_labels(entries: &[Entry]) -> Vec<String> {
    let with_subheaders = entries.windows(2).any(|w| w[0].subheader != w[1].subheader);
    entries
        .iter()
        .map(|e| {
            let header = strip_duplication_suffix(&e.header);
            let header = if e.bold {
                format!("<b>{header}</b>")
            } else {
                header.to_string()
            };
            if with_subheaders {
                format!("{header}\n{}", e.subheader)
            } else {
                header
            }
        })
        .collect()
}

/// Strip the trailing `.1` a transposing authoring tool appends to
/// duplicated column names.
fn strip_duplication_suffix(header: &str) -> &str {
    header.strip_suffix(".1").unwrap_or(header)
}

/// A present color token always loses its first character (an artifact of
/// the upstream encoding); the missing-value default is used verbatim.
fn resolve_color(token: Option<&str>, default: &str) -> String {
    match token {
        None => default.to_string(),
        Some(t) => {
            let mut chars = t.chars();
            chars.next();
            chars.as_str().to_string()
        }
    }
}
