//! Turns benchmark spreadsheets into horizontal bar charts.
//!
//! A source table follows a fixed convention: three metadata rows (header,
//! color token, bold flag), then one data row per chart. The library locates
//! the data region, normalizes each row into a [`extract::ChartUnit`], and
//! packages units into [`chart::ChartSpec`]s for rendering. A second pipeline
//! ([`compare`]) reduces two columns of the same table into a single
//! percentage-difference chart.

pub mod chart;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod render;
pub mod table;
