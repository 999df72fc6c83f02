use std::path::Path;

use colored::Colorize;
use comfy_table::Table;

use crate::error::Result;
use crate::session::Session;

pub fn run(file: &str, sheet: &str) -> Result<()> {
    let mut session = Session::open(Path::new(file))?;
    session.select_sheet(sheet)?;

    if session.tables.is_empty() {
        println!("No tables found on '{}'.", session.sheet);
        return Ok(());
    }

    let mut out = Table::new();
    out.set_header(vec!["#", "Table", "Rows", "Columns"]);
    for (i, table) in session.tables.iter().enumerate() {
        out.add_row(vec![
            (i + 1).to_string(),
            table.label.clone(),
            table.records.len().to_string(),
            table.columns.len().to_string(),
        ]);
    }
    println!("{}\n{out}", format!("Tables on '{}'", session.sheet).bold());
    Ok(())
}
