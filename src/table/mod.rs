// src/table/mod.rs

pub mod layout;

use crate::error::ChartError;

/// Reserved metadata rows: 0 header, 1 color token, 2 bold flag.
pub const METADATA_ROWS: usize = 3;

/// One cell of a loaded table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric view of the cell. Text cells are parsed, since CSV sources
    /// deliver every field as text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(t) => t.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    /// Display text of the cell; `Empty` renders as the empty string and
    /// whole numbers render without a fractional part.
    pub fn text(&self) -> String {
        match self {
            Cell::Text(t) => t.clone(),
            Cell::Number(v) if v.fract() == 0.0 => format!("{}", *v as i64),
            Cell::Number(v) => format!("{v}"),
            Cell::Empty => String::new(),
        }
    }
}

/// A fully materialized table in the fixed "metadata rows + data rows"
/// convention. Purely in-memory; loading lives in [`crate::load`].
#[derive(Debug, Clone)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Wrap rows of cells, validating the convention's minimum shape:
    /// three metadata rows plus at least one data row, and at least the
    /// title/subtitle columns and one further column.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, ChartError> {
        if rows.len() <= METADATA_ROWS {
            return Err(ChartError::DataShape(format!(
                "expected at least {} rows (3 metadata + data), got {}",
                METADATA_ROWS + 1,
                rows.len()
            )));
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width < 3 {
            return Err(ChartError::DataShape(format!(
                "expected at least 3 columns, got {width}"
            )));
        }
        Ok(Self { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row; short rows read as `Empty` past their end.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `(row, col)`, `Empty` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Empty)
    }

    /// Header text of a column (row 0).
    pub fn header(&self, col: usize) -> String {
        self.cell(0, col).text()
    }

    /// Indices of the data rows.
    pub fn data_rows(&self) -> std::ops::Range<usize> {
        METADATA_ROWS..self.rows.len()
    }
}
