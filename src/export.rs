use chrono::Local;
use serde::Serialize;

use crate::filter::{self, FilterState};
use crate::table::Table;
use crate::views::{ChartKind, DataTable, ViewKind};

/// Render columns and display rows as CSV text: plain joined header line,
/// then CRLF-separated rows with every field double-quoted.
pub fn csv_string(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut lines = vec![columns.join(",")];
    for row in rows {
        let quoted: Vec<String> = row
            .iter()
            .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
            .collect();
        lines.push(quoted.join(","));
    }
    lines.join("\r\n")
}

/// CSV of the raw table after branch/product filtering.
pub fn table_to_csv(table: &Table, state: &FilterState) -> String {
    let rows = table.rows_for(&filter::filter_records(table, state));
    csv_string(&table.columns, &rows)
}

pub fn data_table_to_csv(table: &DataTable) -> String {
    csv_string(&table.columns, &table.rows)
}

// --- slide descriptors ------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SlideSeries {
    pub name: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct Slide {
    pub title: String,
    pub chart_kind: String,
    pub series: Vec<SlideSeries>,
}

#[derive(Debug, Serialize)]
pub struct SlideDeck {
    pub title: String,
    pub sheet: String,
    pub generated_on: String,
    pub slides: Vec<Slide>,
}

/// Project every view with the active filters and keep the non-empty ones
/// as slide descriptors for an external renderer. The active branch or
/// product selection is carried into each slide title.
pub fn master_deck(
    table: &Table,
    state: &FilterState,
    chart: ChartKind,
    sheet: &str,
) -> SlideDeck {
    let mut slides = Vec::new();
    for view in ViewKind::ALL {
        let result = view.project(table, state, chart);
        if result.is_empty() {
            continue;
        }
        let mut title = result.layout.title.clone();
        if let Some(branch) = state.branch_selected() {
            title.push_str(&format!(" - {branch}"));
        }
        if let Some(product) = state.product_selected() {
            title.push_str(&format!(" - {product}"));
        }
        slides.push(Slide {
            title,
            chart_kind: chart.key().to_string(),
            series: result
                .series
                .into_iter()
                .map(|s| SlideSeries {
                    name: s.name,
                    labels: s.labels,
                    values: s.values,
                })
                .collect(),
        });
    }

    SlideDeck {
        title: table.label.clone(),
        sheet: sheet.to_string(),
        generated_on: Local::now().format("%Y-%m-%d").to_string(),
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment;
    use crate::table;
    use crate::workbook::Cell;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells
            .iter()
            .map(|s| {
                if s.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(s.to_string())
                }
            })
            .collect()
    }

    fn sample_table() -> Table {
        let grid = vec![
            row(&["SALES IN MT", "", ""]),
            row(&["REGIONS", "BudgetJan-24", "ActJan-24"]),
            row(&["North", "100", "80"]),
            row(&["South", "150", "90"]),
        ];
        let regions = segment::segment(&grid);
        table::extract(&grid, &regions[0])
    }

    #[test]
    fn test_csv_round_trip() {
        let csv_text = table_to_csv(&sample_table(), &FilterState::default());
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_text.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["REGIONS", "BudgetJan-24", "ActJan-24"]
        );
        let records: Vec<csv::StringRecord> =
            rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "North");
        assert_eq!(&records[1][2], "90");
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        let columns = vec!["Name".to_string()];
        let rows = vec![vec!["He said \"hi\"".to_string()]];
        let out = csv_string(&columns, &rows);
        assert_eq!(out, "Name\r\n\"He said \"\"hi\"\"\"");

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(out.as_bytes());
        let record = rdr.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "He said \"hi\"");
    }

    #[test]
    fn test_master_deck_skips_empty_views() {
        let deck = master_deck(
            &sample_table(),
            &FilterState::default(),
            ChartKind::Bar,
            "sales",
        );
        // No LY/Gr/Ach or YTD columns exist, so those views produce no slide.
        let titles: Vec<&str> = deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"Budget vs Actual"));
        assert!(titles.contains(&"Act by Month"));
        assert!(!titles.iter().any(|t| t.starts_with("YTD")));
        assert!(deck.slides.iter().all(|s| !s.series.is_empty()));
        assert_eq!(deck.sheet, "sales");
        assert_eq!(deck.title, "Table 1: SALES IN MT");
    }

    #[test]
    fn test_master_deck_titles_carry_active_filter() {
        let state = FilterState {
            branch: "North".into(),
            ..FilterState::default()
        };
        let deck =
            master_deck(&sample_table(), &state, ChartKind::Bar, "sales");
        assert!(deck
            .slides
            .iter()
            .all(|s| s.title.ends_with(" - North")));
    }
}
