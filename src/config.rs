// src/config.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// All knobs of the pipeline. Every field has a default, so a config file is
/// optional; when present it is YAML with any subset of the fields.
///
/// The directional keywords are data conventions, not algorithm constants:
/// the source tables embed them in subtitle and marker text (the reference
/// tables use Polish wording), so they are configurable rather than
/// hard-coded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Each bar contributes this many pixels to the chart height.
    pub pixels_per_bar: u32,
    /// Extra height reserved for the title block.
    pub header_offset: u32,
    /// Margin of the comparison chart's symmetric range, as a fraction of
    /// the largest absolute percentage.
    pub margin_fraction: f64,
    /// File-name stem used when the table carries no names column.
    pub base_name: Option<String>,
    /// Metadata row supplying label subheaders, if the table variant has one.
    pub subheader_row: Option<usize>,
    /// Column holding direction markers in comparison tables.
    pub marker_column: usize,
    /// Substring marking a synthetic (authoring-tool-generated) header.
    pub placeholder_marker: String,
    /// Substring of a subtitle/marker meaning "lower is better".
    pub lower_keyword: String,
    /// Substring of a marker meaning "higher is better".
    pub higher_keyword: String,
    /// Color token substituted for a missing color cell, used verbatim.
    pub default_color: String,
    /// Comparison bar color for negative percentages.
    pub negative_color: String,
    /// Comparison bar color for non-negative percentages.
    pub positive_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            pixels_per_bar: 100,
            header_offset: 0,
            margin_fraction: 0.13,
            base_name: None,
            subheader_row: None,
            marker_column: 1,
            placeholder_marker: "Unnamed".to_string(),
            lower_keyword: "mniej".to_string(),
            higher_keyword: "więcej".to_string(),
            default_color: "grey".to_string(),
            negative_color: "red".to_string(),
            positive_color: "green".to_string(),
        }
    }
}

impl ChartConfig {
    /// Load a config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.as_ref().display()))?;
        let cfg: ChartConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.as_ref().display()))?;
        Ok(cfg)
    }
}
