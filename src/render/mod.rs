// src/render/mod.rs

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;
use tracing::debug;

use crate::chart::ChartSpec;

/// Render one spec as a horizontal bar chart at `<out_dir>/<file_name>.png`.
///
/// Bar 0 is drawn at the bottom, so an ascending series reads largest-first
/// from the top, matching the source convention. An empty spec produces a
/// blank chart rather than an error.
#[tracing::instrument(level = "debug", skip_all, fields(file = %spec.file_name))]
pub fn render_png(spec: &ChartSpec, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.png", spec.file_name));
    // a degenerate height still has to fit the title block
    let size = (spec.width.max(100), spec.height.max(120));
    let root = BitMapBackend::new(&path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("filling {}: {e}", path.display()))?;

    let n = spec.values.len();
    if n == 0 {
        debug!("empty series, writing blank chart");
        root.present()
            .map_err(|e| anyhow!("writing {}: {e}", path.display()))?;
        return Ok(path.clone());
    }

    let caption = if spec.subtitle.is_empty() {
        spec.title.clone()
    } else {
        format!("{} — {}", spec.title, spec.subtitle)
    };
    let labels: Vec<String> = spec.labels.iter().map(|l| flatten_label(l)).collect();
    let (lo, hi) = x_bounds(spec);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(200)
        .build_cartesian_2d(lo..hi, (0..n as i32).into_segmented())
        .map_err(|e| anyhow!("building chart {}: {e}", path.display()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .label_style(("sans-serif", 13))
        .draw()
        .map_err(|e| anyhow!("drawing mesh {}: {e}", path.display()))?;

    chart
        .draw_series(spec.values.iter().enumerate().map(|(i, v)| {
            let style = color_token(&spec.colors[i]).filled();
            Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(i as i32)),
                    (*v, SegmentValue::Exact(i as i32 + 1)),
                ],
                style,
            )
        }))
        .map_err(|e| anyhow!("drawing bars {}: {e}", path.display()))?;

    // value annotations past the bar ends
    chart
        .draw_series(spec.values.iter().enumerate().map(|(i, v)| {
            Text::new(
                format!("{v}"),
                (*v, SegmentValue::CenterOf(i as i32)),
                ("sans-serif", 13).into_font(),
            )
        }))
        .map_err(|e| anyhow!("drawing annotations {}: {e}", path.display()))?;

    root.present()
        .map_err(|e| anyhow!("writing {}: {e}", path.display()))?;
    debug!(path = %path.display(), "chart written");
    Ok(path.clone())
}

/// Horizontal extent: a comparison spec fixes it, otherwise fit the values
/// with the zero baseline included and a little headroom for annotations.
fn x_bounds(spec: &ChartSpec) -> (f64, f64) {
    if let Some((lo, hi)) = spec.x_range {
        if lo < hi {
            return (lo, hi);
        }
    }
    let min = spec.values.iter().cloned().fold(0.0f64, f64::min);
    let max = spec.values.iter().cloned().fold(0.0f64, f64::max);
    let span = max - min;
    let pad = if span == 0.0 { 1.0 } else { span * 0.1 };
    let lo = if min < 0.0 { min - pad } else { min };
    (lo, max + pad)
}

/// Axis tick labels are single-line plain text in plotters, so strip the
/// bold wrapper and fold the subheader line in.
fn flatten_label(label: &str) -> String {
    label
        .replace("<b>", "")
        .replace("</b>", "")
        .replace('\n', " / ")
}

/// Map a resolved color token to a drawable color. Unknown tokens fall back
/// to grey rather than failing the chart.
fn color_token(token: &str) -> RGBColor {
    if let Some(hex) = token.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(v) = u32::from_str_radix(hex, 16) {
                return RGBColor((v >> 16) as u8, (v >> 8) as u8, v as u8);
            }
        }
    }
    match token.to_ascii_lowercase().as_str() {
        "red" => RGBColor(214, 39, 40),
        "green" => RGBColor(44, 160, 44),
        "blue" => RGBColor(31, 119, 180),
        "orange" => RGBColor(255, 127, 14),
        "yellow" => RGBColor(240, 200, 8),
        "purple" => RGBColor(148, 103, 189),
        "brown" => RGBColor(140, 86, 75),
        "pink" => RGBColor(227, 119, 194),
        "black" => RGBColor(0, 0, 0),
        "white" => RGBColor(255, 255, 255),
        _ => RGBColor(127, 127, 127),
    }
}
