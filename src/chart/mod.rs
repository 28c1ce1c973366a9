// src/chart/mod.rs

use crate::compare::ComparisonUnit;
use crate::config::ChartConfig;
use crate::extract::ChartUnit;

/// Everything the renderer needs for one chart. Pure packaging: the only
/// arithmetic here is the height derivation from the bar count.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub subtitle: String,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    pub colors: Vec<String>,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// Fixed horizontal range; `None` lets the renderer fit the values.
    pub x_range: Option<(f64, f64)>,
}

impl ChartSpec {
    pub fn from_unit(unit: ChartUnit, cfg: &ChartConfig) -> Self {
        let height = bar_height(unit.values.len(), cfg);
        Self {
            title: unit.title,
            subtitle: unit.subtitle,
            values: unit.values,
            labels: unit.labels,
            colors: unit.colors,
            file_name: unit.file_name,
            width: cfg.width,
            height,
            x_range: None,
        }
    }

    pub fn from_comparison(unit: ComparisonUnit, file_name: &str, cfg: &ChartConfig) -> Self {
        let height = bar_height(unit.percentages.len(), cfg);
        Self {
            title: unit.title,
            subtitle: unit.subtitle,
            values: unit.percentages,
            labels: unit.labels,
            colors: unit.colors,
            file_name: file_name.to_string(),
            width: cfg.width,
            height,
            x_range: Some(unit.range),
        }
    }
}

fn bar_height(bars: usize, cfg: &ChartConfig) -> u32 {
    bars as u32 * cfg.pixels_per_bar + cfg.header_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(bars: usize) -> ChartUnit {
        ChartUnit {
            title: "t".into(),
            subtitle: "s".into(),
            ascending: true,
            values: vec![1.0; bars],
            labels: vec![String::from("l"); bars],
            colors: vec![String::from("grey"); bars],
            file_name: "out".into(),
        }
    }

    #[test]
    fn height_scales_with_bar_count() {
        let cfg = ChartConfig::default();
        assert_eq!(ChartSpec::from_unit(unit(4), &cfg).height, 400);
        assert_eq!(ChartSpec::from_unit(unit(0), &cfg).height, 0);
    }

    #[test]
    fn header_offset_is_additive() {
        let cfg = ChartConfig {
            header_offset: 120,
            ..ChartConfig::default()
        };
        assert_eq!(ChartSpec::from_unit(unit(3), &cfg).height, 420);
    }

    #[test]
    fn comparison_spec_carries_the_fixed_range() {
        let cfg = ChartConfig::default();
        let unit = ComparisonUnit {
            title: "A vs B".into(),
            subtitle: "A = 100%".into(),
            labels: vec!["x".into()],
            percentages: vec![-12.5],
            colors: vec!["red".into()],
            range: (-20.0, 20.0),
        };
        let spec = ChartSpec::from_comparison(unit, "cmp", &cfg);
        assert_eq!(spec.x_range, Some((-20.0, 20.0)));
        assert_eq!(spec.file_name, "cmp");
        assert_eq!(spec.height, 100);
    }
}
