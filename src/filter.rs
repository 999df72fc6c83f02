use crate::classify::{self, DimensionRole};
use crate::table::{Record, Table};

/// Sentinel option meaning "no restriction". Every option list leads with it
/// and a fresh `FilterState` selects it everywhere.
pub const SELECT_ALL: &str = "Select All";

/// The four active selectors. Hashable so it can key the projection memo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub month: String,
    pub year: String,
    pub branch: String,
    pub product: String,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            month: SELECT_ALL.to_string(),
            year: SELECT_ALL.to_string(),
            branch: SELECT_ALL.to_string(),
            product: SELECT_ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn month_selected(&self) -> Option<&str> {
        selected(&self.month)
    }

    pub fn branch_selected(&self) -> Option<&str> {
        selected(&self.branch)
    }

    pub fn product_selected(&self) -> Option<&str> {
        selected(&self.product)
    }
}

fn selected(value: &str) -> Option<&str> {
    if value == SELECT_ALL {
        None
    } else {
        Some(value)
    }
}

/// Choice lists offered for a table, each `"Select All"`-prefixed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub months: Vec<String>,
    pub years: Vec<String>,
    pub branches: Vec<String>,
    pub products: Vec<String>,
}

/// Derive the option lists from a table's column names and first column.
/// The year list is offered for parity with months but no view applies it;
/// selecting a year changes nothing downstream.
pub fn derive_options(table: &Table) -> FilterOptions {
    let mut months: Vec<String> = table
        .columns
        .iter()
        .filter_map(|name| classify::period_label(name))
        .collect();
    months.sort_by_key(|l| classify::period_sort_key(l));
    months.dedup();

    let mut years: Vec<String> = table
        .columns
        .iter()
        .filter_map(|name| classify::year_suffix(name))
        .collect();
    years.sort();
    years.dedup();

    let values = table.first_column_values();
    let mut dimension = Vec::new();
    for v in &values {
        if !v.is_empty() && !dimension.contains(v) {
            dimension.push(v.clone());
        }
    }

    let (branches, products) = match classify::guess_dimension(&values) {
        DimensionRole::Branch => (dimension, Vec::new()),
        DimensionRole::Product => (Vec::new(), dimension),
        DimensionRole::Neither => (Vec::new(), Vec::new()),
    };

    FilterOptions {
        months: prefixed(months),
        years: prefixed(years),
        branches: prefixed(branches),
        products: prefixed(products),
    }
}

fn prefixed(mut list: Vec<String>) -> Vec<String> {
    list.insert(0, SELECT_ALL.to_string());
    list
}

/// Records passing the branch/product selectors, which both compare against
/// the first column. Month filtering happens later, on melted period labels.
pub fn filter_records<'a>(table: &'a Table, state: &FilterState) -> Vec<&'a Record> {
    let first = table.columns.first();
    table
        .records
        .iter()
        .filter(|record| {
            let value = first
                .map(|c| Table::value(record, c).trimmed())
                .unwrap_or_default();
            if let Some(branch) = state.branch_selected() {
                if value != branch {
                    return false;
                }
            }
            if let Some(product) = state.product_selected() {
                if value != product {
                    return false;
                }
            }
            true
        })
        .collect()
}
