use std::path::Path;

use colored::Colorize;
use comfy_table::Table;

use crate::cli::FilterArgs;
use crate::error::Result;
use crate::export;
use crate::filter;
use crate::session::Session;

pub fn run(
    file: &str,
    sheet: &str,
    table_no: usize,
    filters: &FilterArgs,
    output: Option<String>,
) -> Result<()> {
    let mut session = Session::open(Path::new(file))?;
    session.select_sheet(sheet)?;
    session.select_table(table_no)?;
    session.set_filters(filters.to_state());

    let table = session.active_table()?;
    let records = filter::filter_records(table, &session.filters);

    let mut out = Table::new();
    out.set_header(table.columns.clone());
    for row in table.rows_for(&records) {
        out.add_row(row);
    }
    println!("{}\n{out}", table.label.bold());
    println!("{} of {} rows", records.len(), table.records.len());

    if let Some(path) = output {
        let csv = export::table_to_csv(table, &session.filters);
        write_text(&path, &csv)?;
    }
    Ok(())
}

pub(crate) fn write_text(path: &str, content: &str) -> Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    println!("Wrote {}", path.display());
    Ok(())
}
