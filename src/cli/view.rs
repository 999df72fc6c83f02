use std::path::Path;

use colored::Colorize;
use comfy_table::Table;

use crate::cli::show::write_text;
use crate::cli::FilterArgs;
use crate::error::Result;
use crate::export;
use crate::fmt;
use crate::session::Session;
use crate::settings;
use crate::views::{ChartKind, ViewKind};

pub fn list() -> Result<()> {
    for view in ViewKind::ALL {
        println!("{}", view.name());
    }
    Ok(())
}

pub(crate) fn chart_or_default(chart: Option<String>) -> Result<ChartKind> {
    match chart {
        Some(key) => ChartKind::parse(&key),
        None => Ok(ChartKind::parse(&settings::load_settings().default_chart)
            .unwrap_or(ChartKind::Bar)),
    }
}

pub fn run(
    file: &str,
    sheet: &str,
    table_no: usize,
    view: &str,
    chart: Option<String>,
    filters: &FilterArgs,
    output: Option<String>,
) -> Result<()> {
    let view = ViewKind::parse(view)?;
    let chart = chart_or_default(chart)?;

    let mut session = Session::open(Path::new(file))?;
    session.select_sheet(sheet)?;
    session.select_table(table_no)?;
    session.set_filters(filters.to_state());

    let result = session.project(view, chart)?;
    println!("{} [{}]", result.layout.title.bold(), chart.key());

    if result.is_empty() {
        println!("No matching columns in this table.");
        return Ok(());
    }

    for series in &result.series {
        let total: f64 = series.values.iter().sum();
        let name = series.name.as_deref().unwrap_or("series");
        println!(
            "{}: {} points, total {}",
            name,
            series.values.len(),
            fmt::number(total)
        );
    }

    let mut out = Table::new();
    out.set_header(result.table.columns.clone());
    for row in &result.table.rows {
        out.add_row(row.clone());
    }
    println!("{out}");

    for (label, value) in &result.summary {
        println!("{}: {}", label.green(), fmt::number(*value));
    }

    if let Some(path) = output {
        write_text(&path, &export::data_table_to_csv(&result.table))?;
    }
    Ok(())
}
