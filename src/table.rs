use std::collections::HashMap;

use crate::segment::TableRegion;
use crate::workbook::{Cell, Grid};

/// One extracted row, keyed by column name. Duplicate header names collide
/// last-write-wins; the ordered `Table::columns` list keeps every name.
pub type Record = HashMap<String, Cell>;

#[derive(Debug, Clone)]
pub struct Table {
    pub label: String,
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    /// Look up a record field, treating a missing key as an empty cell.
    pub fn value<'a>(record: &'a Record, column: &str) -> &'a Cell {
        record.get(column).unwrap_or(&Cell::Empty)
    }

    /// Display strings for the given records, in column order.
    pub fn rows_for(&self, records: &[&Record]) -> Vec<Vec<String>> {
        records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|col| Self::value(record, col).text())
                    .collect()
            })
            .collect()
    }

    /// Values of the first column, in record order.
    pub fn first_column_values(&self) -> Vec<String> {
        let Some(first) = self.columns.first() else {
            return Vec::new();
        };
        self.records
            .iter()
            .map(|r| Self::value(r, first).trimmed())
            .collect()
    }
}

/// Materialize a region into named records. Header cells are trimmed; blank
/// names become `Col{N}` (1-based). Rows with no non-blank cell are
/// separators and skipped. Short rows pad with empty cells.
pub fn extract(grid: &Grid, region: &TableRegion) -> Table {
    let header_row = &grid[region.header];
    let columns: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell.trimmed();
            if name.is_empty() {
                format!("Col{}", i + 1)
            } else {
                name
            }
        })
        .collect();

    let mut records = Vec::new();
    for row in &grid[region.header + 1..region.end] {
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        let mut record = Record::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            let cell = row.get(i).cloned().unwrap_or(Cell::Empty);
            record.insert(name.clone(), cell);
        }
        records.push(record);
    }

    Table {
        label: region.label.clone(),
        columns,
        records,
    }
}
