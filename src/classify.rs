use std::sync::LazyLock;

use regex::Regex;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
    "Nov", "Dec",
];

/// The five metric families a column name can open with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Budget,
    Ly,
    Act,
    Gr,
    Ach,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Budget,
        MetricKind::Ly,
        MetricKind::Act,
        MetricKind::Gr,
        MetricKind::Ach,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Budget => "Budget",
            MetricKind::Ly => "LY",
            MetricKind::Act => "Act",
            MetricKind::Gr => "Gr",
            MetricKind::Ach => "Ach",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            MetricKind::Budget => "budget",
            MetricKind::Ly => "ly",
            MetricKind::Act => "act",
            MetricKind::Gr => "gr",
            MetricKind::Ach => "ach",
        }
    }
}

// Month abbreviation with an optional separator and 2-4 digit year. No
// leading boundary: period labels are usually glued to a metric prefix,
// as in "BudgetJan-24".
static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[-– ]?(\d{2,4})?")
        .unwrap()
});
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-–](\d{2,4})\b").unwrap());

/// Extract a canonical period label ("Mar" or "Mar-24") from a column name.
pub fn period_label(name: &str) -> Option<String> {
    let caps = PERIOD.captures(name)?;
    let month = capitalize_month(&caps[1]);
    match caps.get(2) {
        Some(year) => Some(format!("{}-{}", month, year.as_str())),
        None => Some(month),
    }
}

/// Year digits from a `-YY` / `-YYYY` suffix, independent of month parsing.
pub fn year_suffix(name: &str) -> Option<String> {
    YEAR.captures(name).map(|c| c[1].to_string())
}

/// Column holds a monthly reading of `kind`: starts with the kind prefix
/// and carries no "ytd" anywhere.
pub fn is_metric(name: &str, kind: MetricKind) -> bool {
    let lower = name.to_lowercase();
    lower.starts_with(kind.prefix()) && !lower.contains("ytd")
}

/// Column holds a year-to-date reading of `kind`, in either word order.
pub fn is_ytd_metric(name: &str, kind: MetricKind) -> bool {
    let lower = name.to_lowercase();
    lower.contains("ytd") && lower.contains(kind.prefix())
}

pub fn is_ytd_act_column(name: &str) -> bool {
    is_ytd_metric(name, MetricKind::Act)
}

fn capitalize_month(abbr: &str) -> String {
    let lower = abbr.to_lowercase();
    MONTHS
        .iter()
        .find(|m| m.to_lowercase() == lower)
        .map(|m| m.to_string())
        .unwrap_or(lower)
}

fn month_index(abbr: &str) -> Option<usize> {
    let lower = abbr.to_lowercase();
    MONTHS.iter().position(|m| m.to_lowercase() == lower)
}

/// Chronological sort key for period labels: year first (lexical), then
/// calendar month. Labels that do not parse sort after everything else,
/// alphabetically among themselves.
pub fn period_sort_key(label: &str) -> (u8, String, usize, String) {
    if let Some(caps) = PERIOD.captures(label) {
        if let Some(idx) = month_index(&caps[1]) {
            let year = caps
                .get(2)
                .map(|y| y.as_str().to_string())
                .unwrap_or_default();
            return (0, year, idx, label.to_string());
        }
    }
    (1, String::new(), 0, label.to_string())
}

/// What the first column of a table seems to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionRole {
    Branch,
    Product,
    Neither,
}

/// Guess the dimension from the first column's distinct values. Tables
/// with a short unrecognized dimension default to branches; that default
/// is wrong for small product tables and kept anyway for compatibility.
pub fn guess_dimension(values: &[String]) -> DimensionRole {
    let mut distinct: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    let lower: Vec<String> = distinct.iter().map(|v| v.to_lowercase()).collect();
    if lower.iter().any(|v| v.contains("branch") || v.contains("region")) {
        DimensionRole::Branch
    } else if lower.iter().any(|v| v.contains("product")) {
        DimensionRole::Product
    } else if distinct.len() < 30 {
        DimensionRole::Branch
    } else {
        DimensionRole::Neither
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_label_glued_to_prefix() {
        assert_eq!(period_label("BudgetJan-24"), Some("Jan-24".into()));
        assert_eq!(period_label("Act Mar 2024"), Some("Mar-2024".into()));
        assert_eq!(period_label("LY-Dec"), Some("Dec".into()));
        assert_eq!(period_label("Total"), None);
    }

    #[test]
    fn test_period_label_en_dash_separator() {
        assert_eq!(period_label("ActFeb–24"), Some("Feb-24".into()));
    }

    #[test]
    fn test_year_suffix() {
        assert_eq!(year_suffix("BudgetJan-24"), Some("24".into()));
        assert_eq!(year_suffix("Act-2023"), Some("2023".into()));
        assert_eq!(year_suffix("Budget"), None);
        assert_eq!(year_suffix("Ach-1"), None);
    }

    #[test]
    fn test_is_metric_requires_prefix_and_no_ytd() {
        assert!(is_metric("BudgetJan-24", MetricKind::Budget));
        assert!(is_metric("act feb", MetricKind::Act));
        assert!(!is_metric("YTD Budget", MetricKind::Budget));
        assert!(!is_metric("BudgetYTD", MetricKind::Budget));
        assert!(!is_metric("MyBudget", MetricKind::Budget));
    }

    #[test]
    fn test_is_ytd_metric_any_order() {
        assert!(is_ytd_metric("YTD Act-24", MetricKind::Act));
        assert!(is_ytd_metric("Act YTD", MetricKind::Act));
        assert!(is_ytd_act_column("ytd act mar"));
        assert!(!is_ytd_metric("ActJan-24", MetricKind::Act));
        assert!(!is_ytd_metric("YTD Budget", MetricKind::Act));
    }

    #[test]
    fn test_chronological_sort() {
        let mut labels = vec!["Mar-23", "Jan-24", "Dec-23"];
        labels.sort_by_key(|l| period_sort_key(l));
        assert_eq!(labels, vec!["Mar-23", "Dec-23", "Jan-24"]);
    }

    #[test]
    fn test_unparseable_labels_sort_last() {
        let mut labels = vec!["Total", "Jan-24", "Notes"];
        labels.sort_by_key(|l| period_sort_key(l));
        assert_eq!(labels, vec!["Jan-24", "Notes", "Total"]);
    }

    #[test]
    fn test_guess_dimension_keywords_beat_count() {
        let branches: Vec<String> =
            vec!["North Branch".into(), "South".into()];
        assert_eq!(guess_dimension(&branches), DimensionRole::Branch);

        let products: Vec<String> =
            vec!["Product A".into(), "Product B".into()];
        assert_eq!(guess_dimension(&products), DimensionRole::Product);
    }

    #[test]
    fn test_guess_dimension_small_unrecognized_defaults_to_branch() {
        let values: Vec<String> = vec!["North".into(), "South".into()];
        assert_eq!(guess_dimension(&values), DimensionRole::Branch);
    }

    #[test]
    fn test_guess_dimension_large_unrecognized_is_neither() {
        let values: Vec<String> = (0..40).map(|i| format!("Item {i}")).collect();
        assert_eq!(guess_dimension(&values), DimensionRole::Neither);
    }
}
