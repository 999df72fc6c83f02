pub mod config;
pub mod sheets;
pub mod show;
pub mod slides;
pub mod tables;
pub mod view;

use clap::{Args, Parser, Subcommand};

use crate::filter::{FilterState, SELECT_ALL};

#[derive(Parser)]
#[command(
    name = "sheetlens",
    about = "Discover sub-tables in sales workbooks and project them as charts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared filter flags. An omitted flag means "Select All".
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Month filter, e.g. Jan-24
    #[arg(long)]
    pub month: Option<String>,
    /// Year filter (offered for parity with months; applied by no view)
    #[arg(long)]
    pub year: Option<String>,
    /// Branch filter, matched against the table's first column
    #[arg(long)]
    pub branch: Option<String>,
    /// Product filter, matched against the table's first column
    #[arg(long)]
    pub product: Option<String>,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        let or_all = |opt: &Option<String>| {
            opt.clone().unwrap_or_else(|| SELECT_ALL.to_string())
        };
        FilterState {
            month: or_all(&self.month),
            year: or_all(&self.year),
            branch: or_all(&self.branch),
            product: or_all(&self.product),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change settings.
    Config {
        /// Directory for exported slide decks
        #[arg(long = "export-dir")]
        export_dir: Option<String>,
        /// Default chart kind: bar, pie or line
        #[arg(long)]
        chart: Option<String>,
    },
    /// List the sheets in a workbook.
    Sheets {
        /// Path to an XLSX or CSV file
        file: String,
    },
    /// Discover the tables on a sheet.
    Tables {
        file: String,
        /// Sheet name or 0-based index
        #[arg(long, default_value = "0")]
        sheet: String,
    },
    /// List the available views.
    Views,
    /// Show a table's records after filtering.
    Show {
        file: String,
        /// Sheet name or 0-based index
        #[arg(long, default_value = "0")]
        sheet: String,
        /// Table number as listed by `tables` (1-based)
        #[arg(long, default_value = "1")]
        table: usize,
        #[command(flatten)]
        filters: FilterArgs,
        /// Write the filtered table as CSV to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Project one view of a table.
    View {
        file: String,
        /// Sheet name or 0-based index
        #[arg(long, default_value = "0")]
        sheet: String,
        /// Table number as listed by `tables` (1-based)
        #[arg(long, default_value = "1")]
        table: usize,
        /// View name, e.g. 'Budget vs Actual' (see `views`)
        #[arg(long)]
        view: String,
        /// Chart kind: bar, pie, line (default from settings)
        #[arg(long)]
        chart: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Write the view's data table as CSV to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Export every non-empty view as a slide-deck JSON descriptor.
    Slides {
        file: String,
        /// Sheet name or 0-based index
        #[arg(long, default_value = "0")]
        sheet: String,
        /// Table number as listed by `tables` (1-based)
        #[arg(long, default_value = "1")]
        table: usize,
        /// Chart kind: bar, pie, line (default from settings)
        #[arg(long)]
        chart: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output path (default: <export_dir>/slides-YYYY-MM-DD.json)
        #[arg(long)]
        output: Option<String>,
    },
}
