// src/load/mod.rs

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use tracing::debug;

use crate::table::{Cell, RawTable};

/// Load a table from a spreadsheet (.xlsx/.xlsm/.xlsb/.xls/.ods) or a .csv
/// file, dispatching on the extension.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let rows = match ext.as_str() {
        "csv" => csv_rows(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => spreadsheet_rows(path)?,
        other => return Err(anyhow!("unsupported table format: .{other}")),
    };
    let rows = synthesize_placeholder_headers(rows);
    debug!(rows = rows.len(), "table loaded");
    Ok(RawTable::new(rows)?)
}

fn spreadsheet_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening spreadsheet {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("spreadsheet {} has no sheets", path.display()))?
        .with_context(|| format!("reading first sheet of {}", path.display()))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Number(*b as i64 as f64),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn csv_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening csv {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record =
            record.with_context(|| format!("csv parse error in {} row {idx}", path.display()))?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    // fields stay text; numeric parsing happens at the point
                    // of use so color tokens like " grey" survive untouched
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Give empty header cells the pandas-style `Unnamed: <col>` placeholder so
/// the layout resolver's marker test behaves identically for hand-authored
/// files and tool-exported ones.
fn synthesize_placeholder_headers(mut rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    if let Some(header) = rows.first_mut() {
        for (col, cell) in header.iter_mut().enumerate() {
            if cell.is_empty() {
                *cell = Cell::Text(format!("Unnamed: {col}"));
            }
        }
    }
    rows
}
