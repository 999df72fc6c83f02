use std::sync::LazyLock;

use regex::Regex;

use crate::workbook::{Cell, Grid};

// Table-start markers: a "sales in <unit>" banner (tonnage is misspelled
// "tonage" in the wild often enough to accept both) or any whole metric word.
static SALES_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"sales\s*in\s*(mt|value|tonnage|tonage)").unwrap()
});
static METRIC_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(budget|act|ly|gr|ach)\b").unwrap());

/// A contiguous row range `[start, end)` believed to hold one logical table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegion {
    pub start: usize,
    pub end: usize,
    /// Index of the detected header row, within `[start, end)`.
    pub header: usize,
    pub label: String,
}

/// Joined non-blank cell text of a row, single-space separated.
pub fn row_text(row: &[Cell]) -> String {
    row.iter()
        .map(|c| c.trimmed())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_marker(row: &[Cell]) -> bool {
    let text = row_text(row).to_lowercase();
    SALES_BANNER.is_match(&text) || METRIC_WORD.is_match(&text)
}

fn non_blank_cells(row: &[Cell]) -> usize {
    row.iter().filter(|c| !c.is_blank()).count()
}

/// Split a grid into table regions. Each marker row opens a region that runs
/// to the next marker (exclusive) or the end of the grid. Regions where no
/// header row can be found, or where the header leaves no room for data rows,
/// are dropped silently; surviving regions are numbered consecutively so the
/// label always matches the position shown by table listings.
pub fn segment(grid: &Grid) -> Vec<TableRegion> {
    let markers: Vec<usize> = (0..grid.len()).filter(|&i| is_marker(&grid[i])).collect();

    let mut regions = Vec::new();
    for (n, &start) in markers.iter().enumerate() {
        let end = markers.get(n + 1).copied().unwrap_or(grid.len());
        // Header: first row at/after the marker with at least 2 non-blank cells.
        let Some(header) = (start..end).find(|&i| non_blank_cells(&grid[i]) >= 2) else {
            continue;
        };
        if header + 1 >= end {
            continue; // header is the region's last row, no data possible
        }
        let text = row_text(&grid[start]);
        let title: String = if text.is_empty() {
            "Unnamed Table".to_string()
        } else {
            text.chars().take(30).collect()
        };
        regions.push(TableRegion {
            start,
            end,
            header,
            label: format!("Table {}: {}", regions.len() + 1, title),
        });
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn sample_grid() -> Grid {
        vec![
            row(&["Quarterly report", ""]),
            row(&["SALES IN MT", ""]),
            row(&["REGIONS", "BudgetJan-24", "ActJan-24"]),
            row(&["North", "100", "80"]),
            row(&["South", "150", "90"]),
            row(&["", ""]),
            row(&["SALES IN VALUE", ""]),
            row(&["REGIONS", "BudgetJan-24", "ActJan-24"]),
            row(&["North", "1000", "800"]),
        ]
    }

    #[test]
    fn test_two_regions_found() {
        let regions = segment(&sample_grid());
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].start, 1);
        assert_eq!(regions[0].end, 6);
        assert_eq!(regions[0].header, 2);
        assert_eq!(regions[1].start, 6);
        assert_eq!(regions[1].end, 9);
        assert_eq!(regions[1].header, 7);
    }

    #[test]
    fn test_regions_do_not_overlap_and_last_extends_to_end() {
        let grid = sample_grid();
        let regions = segment(&grid);
        for pair in regions.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert_eq!(regions.last().unwrap().end, grid.len());
    }

    #[test]
    fn test_labels_numbered_in_discovery_order() {
        let regions = segment(&sample_grid());
        assert_eq!(regions[0].label, "Table 1: SALES IN MT");
        assert_eq!(regions[1].label, "Table 2: SALES IN VALUE");
    }

    #[test]
    fn test_label_truncated_to_30_chars() {
        let grid = vec![
            row(&["SALES IN VALUE FOR THE NORTHERN TERRITORIES DIVISION"]),
            row(&["REGIONS", "BudgetJan-24"]),
            row(&["North", "5"]),
        ];
        let regions = segment(&grid);
        assert_eq!(regions[0].label, "Table 1: SALES IN VALUE FOR THE NORTHER");
        assert_eq!(regions[0].label.len(), "Table 1: ".len() + 30);
    }

    #[test]
    fn test_no_markers_means_no_regions() {
        let grid = vec![
            row(&["Random", "data"]),
            row(&["more", "rows"]),
        ];
        assert!(segment(&grid).is_empty());
    }

    #[test]
    fn test_marker_word_requires_whole_word() {
        // "activity" contains "act" but is not a whole-word match
        let grid = vec![row(&["activity summary", "grand"]), row(&["a", "b"])];
        assert!(segment(&grid).is_empty());
    }

    #[test]
    fn test_region_without_header_is_dropped() {
        // Marker region whose rows never have 2 non-blank cells.
        let grid = vec![
            row(&["SALES IN MT", ""]),
            row(&["only-one", ""]),
            row(&["", ""]),
        ];
        assert!(segment(&grid).is_empty());
    }

    #[test]
    fn test_header_on_last_row_is_dropped() {
        let grid = vec![
            row(&["SALES IN MT", ""]),
            row(&["REGIONS", "BudgetJan-24"]),
        ];
        assert!(segment(&grid).is_empty());
    }

    #[test]
    fn test_marker_row_can_be_its_own_header() {
        // A wide "Sales in Tonage" banner doubling as the header row.
        let grid = vec![
            row(&["Sales in Tonage", "BudgetJan-24", "ActJan-24"]),
            row(&["North", "10", "8"]),
        ];
        let regions = segment(&grid);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].header, 0);
    }

    #[test]
    fn test_dropped_region_leaves_no_numbering_gap() {
        // The first marker region has no usable header and is dropped;
        // the survivor is still "Table 1".
        let grid = vec![
            row(&["SALES IN MT", ""]),
            row(&["SALES IN VALUE", ""]),
            row(&["REGIONS", "BudgetJan-24"]),
            row(&["North", "5"]),
        ];
        let regions = segment(&grid);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].label, "Table 1: SALES IN VALUE");
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let grid = sample_grid();
        assert_eq!(segment(&grid), segment(&grid));
    }
}
