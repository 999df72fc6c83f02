use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Reader};

use crate::error::{LensError, Result};

/// A single raw value from a worksheet grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

    pub fn trimmed(&self) -> String {
        self.text().trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric coercion used by the melt step. Text values tolerate
    /// thousands separators; anything unparseable is None, not zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().replace(',', "").parse().ok(),
        }
    }
}

/// One worksheet as a rectangular row-major grid. Ragged source rows are
/// padded with empty cells at ingest.
pub type Grid = Vec<Vec<Cell>>;

pub struct Workbook {
    pub sheet_names: Vec<String>,
    pub sheets: HashMap<String, Grid>,
}

impl Workbook {
    /// Decode a workbook file. CSV files become a single-sheet workbook
    /// named after the file stem; everything else goes through calamine.
    /// This is the one place a hard failure reaches the user.
    pub fn open(path: &Path) -> Result<Workbook> {
        if path
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case("csv"))
        {
            open_csv(path)
        } else {
            open_excel(path)
        }
    }

    pub fn grid(&self, sheet: &str) -> Option<&Grid> {
        self.sheets.get(sheet)
    }

    /// Resolve a sheet selector: exact name first, then a 0-based index.
    pub fn resolve_sheet(&self, selector: &str) -> Result<String> {
        if self.sheets.contains_key(selector) {
            return Ok(selector.to_string());
        }
        if let Ok(idx) = selector.parse::<usize>() {
            if let Some(name) = self.sheet_names.get(idx) {
                return Ok(name.clone());
            }
        }
        Err(LensError::UnknownSheet(selector.to_string()))
    }
}

fn open_excel(path: &Path) -> Result<Workbook> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_owned();
    let mut sheets = HashMap::new();
    for name in &sheet_names {
        let Ok(range) = workbook.worksheet_range(name) else {
            continue;
        };
        let grid: Grid = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();
        sheets.insert(name.clone(), grid);
    }
    Ok(Workbook {
        sheet_names,
        sheets,
    })
}

fn open_csv(path: &Path) -> Result<Workbook> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut grid: Grid = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    let width = grid.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, Cell::Empty);
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string();
    let mut sheets = HashMap::new();
    sheets.insert(name.clone(), grid);
    Ok(Workbook {
        sheet_names: vec![name],
        sheets,
    })
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(
            cell_from_data(&Data::String("North".into())),
            Cell::Text("North".into())
        );
        assert_eq!(cell_from_data(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(cell_from_data(&Data::Int(42)), Cell::Number(42.0));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Text("true".into()));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Cell::Number(3.5).as_number(), Some(3.5));
        assert_eq!(Cell::Text("1,234.56".into()).as_number(), Some(1234.56));
        assert_eq!(Cell::Text("  42 ".into()).as_number(), Some(42.0));
        assert_eq!(Cell::Text("n/a".into()).as_number(), None);
        assert_eq!(Cell::Text("".into()).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn test_cell_text_renders_integers_without_fraction() {
        assert_eq!(Cell::Number(100.0).text(), "100");
        assert_eq!(Cell::Number(0.5).text(), "0.5");
        assert_eq!(Cell::Empty.text(), "");
    }

    #[test]
    fn test_open_csv_pads_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "SALES IN MT\na,b,c\nx,y\n").unwrap();
        let wb = Workbook::open(&path).unwrap();
        assert_eq!(wb.sheet_names, vec!["sales"]);
        let grid = wb.grid("sales").unwrap();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 3));
        assert_eq!(grid[2][2], Cell::Empty);
    }

    #[test]
    fn test_resolve_sheet_by_name_or_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b\n").unwrap();
        let wb = Workbook::open(&path).unwrap();
        assert_eq!(wb.resolve_sheet("data").unwrap(), "data");
        assert_eq!(wb.resolve_sheet("0").unwrap(), "data");
        assert!(wb.resolve_sheet("missing").is_err());
        assert!(wb.resolve_sheet("5").is_err());
    }

    #[test]
    fn test_open_missing_file_is_hard_error() {
        let result = Workbook::open(Path::new("/nonexistent/file.csv"));
        assert!(result.is_err());
    }
}
