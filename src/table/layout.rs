// src/table/layout.rs

use tracing::debug;

use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::table::{Cell, RawTable, METADATA_ROWS};

/// Where the numeric data region starts, resolved once per table.
///
/// Column 2 is the structural ambiguity of the convention: when its header is
/// a synthetic placeholder the column holds per-row output file names and the
/// data region starts at column 3; otherwise column 2 is already data and the
/// file names are generated from a configured base name.
#[derive(Debug, Clone, PartialEq)]
pub enum TableLayout {
    NamesColumn { names: Vec<String> },
    GeneratedNames { names: Vec<String> },
}

impl TableLayout {
    /// Inspect the column-2 header and build the per-data-row name list.
    ///
    /// Fails with [`ChartError::Configuration`] when the table has no names
    /// column and no base name was configured; the caller must not fall back
    /// to prompting or a silent default.
    pub fn resolve(table: &RawTable, cfg: &ChartConfig) -> Result<Self, ChartError> {
        let header = table.cell(0, 2);
        let placeholder = match header {
            Cell::Empty => true,
            Cell::Text(t) => t.contains(&cfg.placeholder_marker),
            Cell::Number(_) => false,
        };

        if placeholder {
            let names = table
                .data_rows()
                .map(|row| table.cell(row, 2).text())
                .collect::<Vec<_>>();
            debug!(count = names.len(), "names column present");
            return Ok(TableLayout::NamesColumn { names });
        }

        let base = cfg.base_name.as_deref().ok_or_else(|| {
            ChartError::Configuration(
                "table has no names column and no base_name is configured".to_string(),
            )
        })?;
        let names = table
            .data_rows()
            .enumerate()
            .map(|(k, _)| format!("{base}{k}"))
            .collect::<Vec<_>>();
        debug!(count = names.len(), base, "generating file names");
        Ok(TableLayout::GeneratedNames { names })
    }

    /// First column of the data region.
    pub fn data_start(&self) -> usize {
        match self {
            TableLayout::NamesColumn { .. } => 3,
            TableLayout::GeneratedNames { .. } => 2,
        }
    }

    /// Output file name for a data row (row 3 maps to the first name).
    pub fn file_name(&self, row: usize) -> Result<&str, ChartError> {
        let names = match self {
            TableLayout::NamesColumn { names } => names,
            TableLayout::GeneratedNames { names } => names,
        };
        names
            .get(row.wrapping_sub(METADATA_ROWS))
            .map(String::as_str)
            .ok_or_else(|| {
                ChartError::DataShape(format!("row {row} has no corresponding file name"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_util::table;

    #[test]
    fn placeholder_header_selects_names_column() {
        let t = table(&[
            &["Title", "Sub", "Unnamed: 2", "ColA"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["t1", "s1", "first", "10"],
            &["t2", "s2", "second", "20"],
        ]);
        let layout = TableLayout::resolve(&t, &ChartConfig::default()).unwrap();
        assert_eq!(layout.data_start(), 3);
        assert_eq!(layout.file_name(3).unwrap(), "first");
        assert_eq!(layout.file_name(4).unwrap(), "second");
    }

    #[test]
    fn empty_header_counts_as_placeholder() {
        let t = table(&[
            &["Title", "Sub", "", "ColA"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["t1", "s1", "only", "10"],
        ]);
        let layout = TableLayout::resolve(&t, &ChartConfig::default()).unwrap();
        assert_eq!(layout.data_start(), 3);
        assert_eq!(layout.file_name(3).unwrap(), "only");
    }

    #[test]
    fn real_header_generates_names_from_base() {
        let t = table(&[
            &["Title", "Sub", "ColA", "ColB"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["t1", "s1", "10", "20"],
            &["t2", "s2", "30", "40"],
        ]);
        let cfg = ChartConfig {
            base_name: Some("bench".to_string()),
            ..ChartConfig::default()
        };
        let layout = TableLayout::resolve(&t, &cfg).unwrap();
        assert_eq!(layout.data_start(), 2);
        assert_eq!(layout.file_name(3).unwrap(), "bench0");
        assert_eq!(layout.file_name(4).unwrap(), "bench1");
    }

    #[test]
    fn missing_base_name_is_a_configuration_error() {
        let t = table(&[
            &["Title", "Sub", "ColA", "ColB"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["t1", "s1", "10", "20"],
        ]);
        let err = TableLayout::resolve(&t, &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::Configuration(_)));
    }

    #[test]
    fn rows_past_the_name_list_are_rejected() {
        let t = table(&[
            &["Title", "Sub", "", "ColA"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["t1", "s1", "only", "10"],
        ]);
        let layout = TableLayout::resolve(&t, &ChartConfig::default()).unwrap();
        assert!(layout.file_name(4).is_err());
    }
}
