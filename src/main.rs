mod classify;
mod cli;
mod error;
mod export;
mod filter;
mod fmt;
mod segment;
mod session;
mod settings;
mod table;
mod views;
mod workbook;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config { export_dir, chart } => cli::config::run(export_dir, chart),
        Commands::Sheets { file } => cli::sheets::run(&file),
        Commands::Tables { file, sheet } => cli::tables::run(&file, &sheet),
        Commands::Views => cli::view::list(),
        Commands::Show {
            file,
            sheet,
            table,
            filters,
            output,
        } => cli::show::run(&file, &sheet, table, &filters, output),
        Commands::View {
            file,
            sheet,
            table,
            view,
            chart,
            filters,
            output,
        } => cli::view::run(&file, &sheet, table, &view, chart, &filters, output),
        Commands::Slides {
            file,
            sheet,
            table,
            chart,
            filters,
            output,
        } => cli::slides::run(&file, &sheet, table, chart, &filters, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
