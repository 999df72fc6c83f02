use std::path::{Path, PathBuf};

use crate::cli::view::chart_or_default;
use crate::cli::FilterArgs;
use crate::error::{LensError, Result};
use crate::export;
use crate::session::Session;
use crate::settings;

fn default_path() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    settings::get_export_dir().join(format!("slides-{date}.json"))
}

pub fn run(
    file: &str,
    sheet: &str,
    table_no: usize,
    chart: Option<String>,
    filters: &FilterArgs,
    output: Option<String>,
) -> Result<()> {
    let chart = chart_or_default(chart)?;

    let mut session = Session::open(Path::new(file))?;
    session.select_sheet(sheet)?;
    session.select_table(table_no)?;
    session.set_filters(filters.to_state());

    let deck = export::master_deck(
        session.active_table()?,
        &session.filters,
        chart,
        &session.sheet,
    );
    let json = serde_json::to_string_pretty(&deck)
        .map_err(|e| LensError::Other(e.to_string()))?;

    let path = output.map(PathBuf::from).unwrap_or_else(default_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, format!("{json}\n"))?;
    println!("Wrote {} ({} slides)", path.display(), deck.slides.len());
    Ok(())
}
