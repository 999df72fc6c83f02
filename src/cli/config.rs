use colored::Colorize;

use crate::error::Result;
use crate::settings::{load_settings, save_settings};
use crate::views::ChartKind;

/// Show the current settings, persisting any changes first.
pub fn run(export_dir: Option<String>, chart: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    let mut changed = false;

    if let Some(dir) = export_dir {
        settings.export_dir = dir;
        changed = true;
    }
    if let Some(key) = chart {
        settings.default_chart = ChartKind::parse(&key)?.key().to_string();
        changed = true;
    }
    if changed {
        save_settings(&settings)?;
        println!("{}", "Settings saved.".green());
    }

    println!("export_dir: {}", settings.export_dir);
    println!("default_chart: {}", settings.default_chart);
    Ok(())
}
