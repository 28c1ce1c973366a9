// src/compare/mod.rs

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::table::RawTable;

/// The reduction of two columns across a whole table: one entry per data
/// row, sorted ascending by percentage, colored by sign.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonUnit {
    pub title: String,
    pub subtitle: String,
    pub labels: Vec<String>,
    pub percentages: Vec<f64>,
    pub colors: Vec<String>,
    /// Symmetric display range: `(-hi, hi)` with every percentage inside.
    pub range: (f64, f64),
}

/// Compare the table's two trailing columns.
///
/// Column 0 holds entry labels and the configured marker column holds the
/// per-entry direction text. The baseline column is whichever of the two
/// trailing columns is named inside a direction marker; the first marker
/// naming one decides for the whole table.
pub fn comparison_unit(table: &RawTable, cfg: &ChartConfig) -> Result<ComparisonUnit, ChartError> {
    let cols = table.column_count();
    if cols < 4 {
        return Err(ChartError::DataShape(format!(
            "comparison needs label, marker and two series columns, got {cols} columns"
        )));
    }
    let (col_a, col_b) = (cols - 2, cols - 1);
    let (baseline_col, comparand_col) = resolve_baseline(table, cfg, col_a, col_b)?;
    let baseline_name = table.header(baseline_col);
    let comparand_name = table.header(comparand_col);
    debug!(baseline = %baseline_name, comparand = %comparand_name, "baseline resolved");

    let mut entries = Vec::new();
    for row in table.data_rows() {
        let label = table.cell(row, 0).text();
        let marker = table.cell(row, cfg.marker_column).text();
        let percentage = if marker.contains(&cfg.lower_keyword) {
            ratio(table, row, baseline_col, comparand_col)?
        } else if marker.contains(&cfg.higher_keyword) {
            ratio(table, row, comparand_col, baseline_col)?
        } else {
            // a marker matching neither keyword contributes a flat 0
            warn!(row, marker = %marker, "direction marker matches neither keyword");
            0.0
        };
        entries.push((label, round1(percentage)));
    }

    entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let max_abs = entries.iter().fold(0.0f64, |m, e| m.max(e.1.abs()));
    let hi = max_abs * (1.0 + cfg.margin_fraction);
    let colors = entries
        .iter()
        .map(|e| {
            if e.1 < 0.0 {
                cfg.negative_color.clone()
            } else {
                cfg.positive_color.clone()
            }
        })
        .collect();

    Ok(ComparisonUnit {
        title: format!("{baseline_name} vs {comparand_name}"),
        subtitle: format!("{baseline_name} = 100%"),
        percentages: entries.iter().map(|e| e.1).collect(),
        labels: entries.into_iter().map(|e| e.0).collect(),
        colors,
        range: (-hi, hi),
    })
}

/// Decide which trailing column the markers treat as the 100% reference.
fn resolve_baseline(
    table: &RawTable,
    cfg: &ChartConfig,
    col_a: usize,
    col_b: usize,
) -> Result<(usize, usize), ChartError> {
    let name_a = table.header(col_a);
    let name_b = table.header(col_b);
    for row in table.data_rows() {
        let marker = table.cell(row, cfg.marker_column).text();
        if !name_a.is_empty() && marker.contains(&name_a) {
            return Ok((col_a, col_b));
        }
        if !name_b.is_empty() && marker.contains(&name_b) {
            return Ok((col_b, col_a));
        }
    }
    Err(ChartError::Configuration(format!(
        "no direction marker references either series column ({name_a:?}, {name_b:?})"
    )))
}

/// `numerator / denominator * 100 - 100`, with missing or zero denominators
/// reported as data errors rather than coerced.
fn ratio(
    table: &RawTable,
    row: usize,
    numerator_col: usize,
    denominator_col: usize,
) -> Result<f64, ChartError> {
    let num = table
        .cell(row, numerator_col)
        .as_f64()
        .ok_or_else(|| ChartError::Arithmetic {
            row,
            detail: format!("missing value in column {numerator_col}"),
        })?;
    let den = table
        .cell(row, denominator_col)
        .as_f64()
        .ok_or_else(|| ChartError::Arithmetic {
            row,
            detail: format!("missing value in column {denominator_col}"),
        })?;
    if den == 0.0 {
        return Err(ChartError::Arithmetic {
            row,
            detail: format!("division by zero in column {denominator_col}"),
        });
    }
    Ok(num / den * 100.0 - 100.0)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_util::table;

    // Table convention: col 0 labels, col 1 markers, last two columns the
    // series; rows 0-2 are the usual metadata rows.
    fn cmp_table(rows: &[&[&str]]) -> RawTable {
        table(rows)
    }

    #[test]
    fn lower_is_better_divides_baseline_by_comparand() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["compile", "mniej, Old", "200", "100"],
        ]);
        let unit = comparison_unit(&t, &ChartConfig::default()).unwrap();
        // baseline Old=200, comparand New=100, lower is better
        assert_eq!(unit.percentages, vec![100.0]);
        assert_eq!(unit.title, "Old vs New");
        assert_eq!(unit.subtitle, "Old = 100%");
    }

    #[test]
    fn higher_is_better_divides_comparand_by_baseline() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["fps", "więcej, Old", "100", "200"],
        ]);
        let unit = comparison_unit(&t, &ChartConfig::default()).unwrap();
        assert_eq!(unit.percentages, vec![100.0]);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["a", "mniej, Old", "100", "300"],
        ]);
        let unit = comparison_unit(&t, &ChartConfig::default()).unwrap();
        // 100/300*100-100 = -66.666... -> -66.7
        assert_eq!(unit.percentages, vec![-66.7]);
    }

    #[test]
    fn entries_sort_ascending_and_color_by_sign() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["a", "mniej, Old", "100", "200"],
            &["b", "mniej", "400", "100"],
            &["c", "nothing here", "1", "1"],
        ]);
        let unit = comparison_unit(&t, &ChartConfig::default()).unwrap();
        assert_eq!(unit.percentages, vec![-50.0, 0.0, 300.0]);
        assert_eq!(unit.labels, vec!["a", "c", "b"]);
        assert_eq!(unit.colors, vec!["red", "green", "green"]);
    }

    #[test]
    fn display_range_is_symmetric_with_margin() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["a", "mniej, Old", "100", "200"],
            &["b", "mniej", "300", "100"],
        ]);
        let unit = comparison_unit(&t, &ChartConfig::default()).unwrap();
        let (lo, hi) = unit.range;
        assert_eq!(lo, -hi);
        let max_abs = unit.percentages.iter().fold(0.0f64, |m, p| m.max(p.abs()));
        assert!(hi >= max_abs);
        assert!((hi - max_abs * 1.13).abs() < 1e-9);
    }

    #[test]
    fn unmatched_markers_default_to_zero_without_touching_values() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["a", "mniej, Old", "100", "200"],
            &["b", "no keyword", "", ""],
        ]);
        let unit = comparison_unit(&t, &ChartConfig::default()).unwrap();
        assert_eq!(unit.percentages, vec![-50.0, 0.0]);
    }

    #[test]
    fn zero_divisor_is_an_arithmetic_error() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["a", "więcej, Old", "0", "200"],
        ]);
        let err = comparison_unit(&t, &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::Arithmetic { row: 3, .. }));
    }

    #[test]
    fn missing_series_value_is_an_arithmetic_error() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["a", "mniej, Old", "", "200"],
        ]);
        assert!(matches!(
            comparison_unit(&t, &ChartConfig::default()),
            Err(ChartError::Arithmetic { .. })
        ));
    }

    #[test]
    fn marker_naming_neither_column_is_a_configuration_error() {
        let t = cmp_table(&[
            &["Test", "Direction", "Old", "New"],
            &["", "", "", ""],
            &["", "", "", ""],
            &["a", "mniej", "100", "200"],
        ]);
        assert!(matches!(
            comparison_unit(&t, &ChartConfig::default()),
            Err(ChartError::Configuration(_))
        ));
    }
}
