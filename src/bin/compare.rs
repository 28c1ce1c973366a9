use std::{env, fs, path::PathBuf, process};

use anyhow::{Context, Result};
use benchplot::{chart::ChartSpec, compare, config::ChartConfig, load, render};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn usage() -> ! {
    eprintln!("usage: compare [--config FILE] [--out DIR] [--name NAME] <table.xlsx|csv>");
    process::exit(2);
}

/// Reduce a two-series table into a single percentage-difference chart.
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut cfg = ChartConfig::default();
    let mut out_dir = PathBuf::from("charts");
    let mut name = String::from("comparison");
    let mut input: Option<PathBuf> = None;

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
            "--name" => {
                i += 1;
                name = args.get(i).unwrap_or_else(|| usage()).clone();
            }
            flag if flag.starts_with("--") => usage(),
            path => {
                if input.replace(PathBuf::from(path)).is_some() {
                    usage();
                }
            }
        }
        i += 1;
    }
    let input = input.unwrap_or_else(|| usage());

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;

    let table = load::load_table(&input)?;
    let unit = compare::comparison_unit(&table, &cfg)
        .with_context(|| format!("comparing {}", input.display()))?;
    info!(title = %unit.title, entries = unit.percentages.len(), "comparison computed");

    let spec = ChartSpec::from_comparison(unit, &name, &cfg);
    let path = render::render_png(&spec, &out_dir)?;
    info!(path = %path.display(), "comparison chart written");
    Ok(())
}
