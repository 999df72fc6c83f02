use std::collections::HashMap;
use std::path::Path;

use crate::error::{LensError, Result};
use crate::filter::{self, FilterOptions, FilterState};
use crate::segment;
use crate::table::{self, Table};
use crate::views::{ChartKind, ViewKind, ViewResult};
use crate::workbook::Workbook;

/// All state for one open workbook: the selected sheet's tables, the active
/// table, the filter selections, and a projection memo. Selecting a sheet or
/// table resets everything downstream of it.
pub struct Session {
    workbook: Workbook,
    pub sheet: String,
    pub tables: Vec<Table>,
    active: Option<usize>,
    pub filters: FilterState,
    pub options: Option<FilterOptions>,
    memo: HashMap<(ViewKind, ChartKind, FilterState), ViewResult>,
}

impl Session {
    /// Open a workbook and select its first sheet.
    pub fn open(path: &Path) -> Result<Session> {
        let workbook = Workbook::open(path)?;
        let first = workbook
            .sheet_names
            .first()
            .cloned()
            .ok_or_else(|| LensError::UnknownSheet("(no sheets)".to_string()))?;
        let mut session = Session {
            workbook,
            sheet: String::new(),
            tables: Vec::new(),
            active: None,
            filters: FilterState::default(),
            options: None,
            memo: HashMap::new(),
        };
        session.select_sheet(&first)?;
        Ok(session)
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.workbook.sheet_names
    }

    /// Select a sheet by name or 0-based index and rediscover its tables.
    pub fn select_sheet(&mut self, selector: &str) -> Result<()> {
        let name = self.workbook.resolve_sheet(selector)?;
        let grid = self
            .workbook
            .grid(&name)
            .ok_or_else(|| LensError::UnknownSheet(name.clone()))?;
        self.tables = segment::segment(grid)
            .iter()
            .map(|region| table::extract(grid, region))
            .collect();
        self.sheet = name;
        self.active = None;
        self.filters = FilterState::default();
        self.options = None;
        self.memo.clear();
        Ok(())
    }

    /// Select a table by its 1-based number as listed by discovery.
    pub fn select_table(&mut self, number: usize) -> Result<()> {
        if number == 0 || number > self.tables.len() {
            return Err(LensError::UnknownTable(number));
        }
        self.active = Some(number - 1);
        self.filters = FilterState::default();
        self.options = Some(filter::derive_options(&self.tables[number - 1]));
        self.memo.clear();
        Ok(())
    }

    pub fn active_table(&self) -> Result<&Table> {
        self.active
            .and_then(|i| self.tables.get(i))
            .ok_or(LensError::NoTable)
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Memoized projection. The key includes the filter state, so stale
    /// entries cannot be served; re-selection clears the map outright.
    pub fn project(&mut self, view: ViewKind, chart: ChartKind) -> Result<ViewResult> {
        let key = (view, chart, self.filters.clone());
        if let Some(cached) = self.memo.get(&key) {
            return Ok(cached.clone());
        }
        let result = view.project(self.active_table()?, &self.filters, chart);
        self.memo.insert(key, result.clone());
        Ok(result)
    }
}
