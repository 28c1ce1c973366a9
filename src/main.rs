use std::{env, fs, path::Path, path::PathBuf, process};

use anyhow::{Context, Result};
use benchplot::{
    chart::ChartSpec,
    config::ChartConfig,
    extract, load, render,
    table::layout::TableLayout,
};
use glob::glob;
use rayon::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn usage() -> ! {
    eprintln!(
        "usage: benchplot [--config FILE] [--out DIR] [--base-name NAME] <table.xlsx|csv|glob>..."
    );
    process::exit(2);
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) parse arguments ──────────────────────────────────────────
    let args: Vec<String> = env::args().skip(1).collect();
    let mut cfg = ChartConfig::default();
    let mut out_dir = PathBuf::from("charts");
    let mut patterns: Vec<String> = Vec::new();
    let mut base_name: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                cfg = ChartConfig::from_file(args.get(i).unwrap_or_else(|| usage()))?;
            }
            "--out" => {
                i += 1;
                out_dir = PathBuf::from(args.get(i).unwrap_or_else(|| usage()));
            }
            "--base-name" => {
                i += 1;
                base_name = Some(args.get(i).unwrap_or_else(|| usage()).clone());
            }
            flag if flag.starts_with("--") => usage(),
            pattern => patterns.push(pattern.to_string()),
        }
        i += 1;
    }
    if patterns.is_empty() {
        usage();
    }
    // the flag wins over whatever the config file says
    if base_name.is_some() {
        cfg.base_name = base_name;
    }

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;
    info!(out = %out_dir.display(), "startup");

    // ─── 3) process each table, continuing past failures ─────────────
    let mut tables = 0usize;
    let mut failures = 0usize;
    for pattern in &patterns {
        let paths = glob(pattern).with_context(|| format!("bad glob pattern {pattern}"))?;
        for entry in paths {
            let path = entry?;
            tables += 1;
            match process_table(&path, &cfg, &out_dir) {
                Ok(charts) => info!(path = %path.display(), charts, "table done"),
                Err(err) => {
                    error!(path = %path.display(), error = %err, "table failed");
                    failures += 1;
                }
            }
        }
    }

    if tables == 0 {
        warn!("no input tables matched");
    }
    if failures > 0 {
        warn!(failures, tables, "finished with failures");
    } else {
        info!(tables, "finished");
    }
    Ok(())
}

/// Render one chart per data row of `path`. Row-level problems are absorbed
/// inside extraction; any error returned here aborts this table only.
fn process_table(path: &Path, cfg: &ChartConfig, out_dir: &Path) -> Result<usize> {
    let table = load::load_table(path)?;
    let layout = TableLayout::resolve(&table, cfg)?;

    let specs: Vec<ChartSpec> = table
        .data_rows()
        .map(|row| {
            extract::chart_unit(&table, &layout, row, cfg).map(|unit| {
                if unit.values.is_empty() {
                    warn!(row, "data row has no values, chart will be empty");
                }
                ChartSpec::from_unit(unit, cfg)
            })
        })
        .collect::<Result<_, _>>()?;

    // chart units are independent, so rendering fans out per row
    let count = specs.len();
    specs
        .into_par_iter()
        .map(|spec| render::render_png(&spec, out_dir).map(|_| ()))
        .collect::<Result<Vec<()>>>()?;
    Ok(count)
}
