use std::collections::HashMap;

use crate::classify::{self, MetricKind};
use crate::error::{LensError, Result};
use crate::filter::{self, FilterState};
use crate::fmt;
use crate::table::{Record, Table};

pub const BUDGET_COLOR: &str = "#2E86AB";
pub const ACT_COLOR: &str = "#FF8C00";

// Dimension rows that are totals, not members.
const EXCLUDED_DIMENSIONS: [&str; 2] = ["north total", "grand total"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Pie, ChartKind::Line];

    pub fn key(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
        }
    }

    pub fn parse(input: &str) -> Result<ChartKind> {
        ChartKind::ALL
            .into_iter()
            .find(|c| c.key() == input.to_lowercase())
            .ok_or_else(|| LensError::UnknownChart(input.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
}

/// Display-ready aggregation backing a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult {
    pub series: Vec<Series>,
    pub layout: Layout,
    pub table: DataTable,
    pub summary: Vec<(String, f64)>,
}

impl ViewResult {
    fn empty(title: &str) -> ViewResult {
        ViewResult {
            series: Vec::new(),
            layout: Layout {
                title: title.to_string(),
                x_title: String::new(),
                y_title: String::new(),
            },
            table: DataTable {
                columns: Vec::new(),
                rows: Vec::new(),
            },
            summary: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// The fixed catalog of projections. Each variant knows how to shape a
/// table into chart series; columns that match nothing yield an empty
/// result, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    BudgetVsActual,
    Monthly(MetricKind),
    Ytd(MetricKind),
    BranchPerformance,
    BranchMonthwise,
    ProductPerformance,
    ProductMonthwise,
}

impl ViewKind {
    pub const ALL: [ViewKind; 15] = [
        ViewKind::BudgetVsActual,
        ViewKind::Monthly(MetricKind::Budget),
        ViewKind::Monthly(MetricKind::Ly),
        ViewKind::Monthly(MetricKind::Act),
        ViewKind::Monthly(MetricKind::Gr),
        ViewKind::Monthly(MetricKind::Ach),
        ViewKind::Ytd(MetricKind::Budget),
        ViewKind::Ytd(MetricKind::Ly),
        ViewKind::Ytd(MetricKind::Act),
        ViewKind::Ytd(MetricKind::Gr),
        ViewKind::Ytd(MetricKind::Ach),
        ViewKind::BranchPerformance,
        ViewKind::BranchMonthwise,
        ViewKind::ProductPerformance,
        ViewKind::ProductMonthwise,
    ];

    pub fn name(&self) -> String {
        match self {
            ViewKind::BudgetVsActual => "Budget vs Actual".to_string(),
            ViewKind::Monthly(kind) => kind.label().to_string(),
            ViewKind::Ytd(kind) => format!("YTD {}", kind.label()),
            ViewKind::BranchPerformance => "Branch Performance".to_string(),
            ViewKind::BranchMonthwise => "Branch Monthwise".to_string(),
            ViewKind::ProductPerformance => "Product Performance".to_string(),
            ViewKind::ProductMonthwise => "Product Monthwise".to_string(),
        }
    }

    pub fn parse(input: &str) -> Result<ViewKind> {
        let wanted = input.trim().to_lowercase();
        ViewKind::ALL
            .into_iter()
            .find(|v| v.name().to_lowercase() == wanted)
            .ok_or_else(|| LensError::UnknownView(input.to_string()))
    }

    pub fn project(&self, table: &Table, state: &FilterState, chart: ChartKind) -> ViewResult {
        match self {
            ViewKind::BudgetVsActual => budget_vs_actual(table, state, chart),
            ViewKind::Monthly(kind) => monthly_metric(table, state, *kind, chart),
            ViewKind::Ytd(kind) => ytd_metric(table, state, *kind, chart),
            ViewKind::BranchPerformance => performance(table, state, "Branch", chart),
            ViewKind::ProductPerformance => performance(table, state, "Product", chart),
            ViewKind::BranchMonthwise => monthwise(table, state, "Branch", chart),
            ViewKind::ProductMonthwise => monthwise(table, state, "Product", chart),
        }
    }
}

// --- melt / aggregate -------------------------------------------------------

/// Per-cell melt of the given columns: one `(period, value)` pair per
/// numeric cell, everything else silently skipped.
fn melt(records: &[&Record], columns: &[&String], state: &FilterState) -> Vec<(String, f64)> {
    let mut rows = Vec::new();
    for record in records {
        for &column in columns {
            let Some(value) = Table::value(record, column).as_number() else {
                continue;
            };
            let period =
                classify::period_label(column).unwrap_or_else(|| column.clone());
            if let Some(month) = state.month_selected() {
                if period != month {
                    continue;
                }
            }
            rows.push((period, value));
        }
    }
    rows
}

/// Sum melted rows by period and return them in chronological order.
fn aggregate(rows: &[(String, f64)]) -> Vec<(String, f64)> {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for (period, value) in rows {
        *sums.entry(period).or_insert(0.0) += value;
    }
    let mut out: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by_key(|(period, _)| classify::period_sort_key(period));
    out
}

fn metric_columns(table: &Table, kind: MetricKind) -> Vec<&String> {
    table
        .columns
        .iter()
        .filter(|name| classify::is_metric(name, kind))
        .collect()
}

fn color_for(kind: MetricKind) -> Option<String> {
    match kind {
        MetricKind::Budget => Some(BUDGET_COLOR.to_string()),
        MetricKind::Act => Some(ACT_COLOR.to_string()),
        _ => None,
    }
}

/// Pie charts only render positive slices.
fn positive_slices(labels: Vec<String>, values: Vec<f64>) -> (Vec<String>, Vec<f64>) {
    labels
        .into_iter()
        .zip(values)
        .filter(|(_, v)| *v > 0.0)
        .unzip()
}

fn shape_single(
    name: &str,
    aggregated: Vec<(String, f64)>,
    color: Option<String>,
    chart: ChartKind,
) -> Series {
    let (labels, values): (Vec<String>, Vec<f64>) = aggregated.into_iter().unzip();
    let (labels, values) = match chart {
        ChartKind::Pie => positive_slices(labels, values),
        ChartKind::Bar | ChartKind::Line => (labels, values),
    };
    Series {
        name: Some(name.to_string()),
        labels,
        values,
        color,
    }
}

fn periods_table(axis_name: &str, value_name: &str, rows: &[(String, f64)]) -> DataTable {
    DataTable {
        columns: vec![axis_name.to_string(), value_name.to_string()],
        rows: rows
            .iter()
            .map(|(label, value)| vec![label.clone(), fmt::number(*value)])
            .collect(),
    }
}

// --- the views --------------------------------------------------------------

fn metric_over_periods(
    table: &Table,
    state: &FilterState,
    kind: MetricKind,
    chart: ChartKind,
    columns: Vec<&String>,
    title: String,
    axis_name: &str,
) -> ViewResult {
    if columns.is_empty() {
        return ViewResult::empty(&title);
    }
    let records = filter::filter_records(table, state);
    let aggregated = aggregate(&melt(&records, &columns, state));
    if aggregated.is_empty() {
        return ViewResult::empty(&title);
    }
    let table_out = periods_table(axis_name, kind.label(), &aggregated);
    let series = shape_single(kind.label(), aggregated, color_for(kind), chart);
    ViewResult {
        series: vec![series],
        layout: Layout {
            title,
            x_title: axis_name.to_string(),
            y_title: kind.label().to_string(),
        },
        table: table_out,
        summary: Vec::new(),
    }
}

fn monthly_metric(
    table: &Table,
    state: &FilterState,
    kind: MetricKind,
    chart: ChartKind,
) -> ViewResult {
    let columns = metric_columns(table, kind);
    let title = format!("{} by Month", kind.label());
    metric_over_periods(table, state, kind, chart, columns, title, "Month")
}

fn ytd_metric(
    table: &Table,
    state: &FilterState,
    kind: MetricKind,
    chart: ChartKind,
) -> ViewResult {
    let columns: Vec<&String> = table
        .columns
        .iter()
        .filter(|name| classify::is_ytd_metric(name, kind))
        .collect();
    let title = format!("YTD {} by Period", kind.label());
    metric_over_periods(table, state, kind, chart, columns, title, "Period")
}

fn budget_vs_actual(table: &Table, state: &FilterState, chart: ChartKind) -> ViewResult {
    let title = "Budget vs Actual".to_string();
    let budget_cols = metric_columns(table, MetricKind::Budget);
    let act_cols = metric_columns(table, MetricKind::Act);
    if budget_cols.is_empty() || act_cols.is_empty() {
        return ViewResult::empty(&title);
    }

    // A record with any unparseable selected cell is dropped whole, unlike
    // the per-cell monthly melt.
    let records: Vec<&Record> = filter::filter_records(table, state)
        .into_iter()
        .filter(|record| {
            budget_cols
                .iter()
                .chain(act_cols.iter())
                .all(|col| Table::value(record, col).as_number().is_some())
        })
        .collect();

    let budget = aggregate(&melt(&records, &budget_cols, state));
    let act = aggregate(&melt(&records, &act_cols, state));
    if budget.is_empty() && act.is_empty() {
        return ViewResult::empty(&title);
    }

    // Shared chronological axis, missing combinations read as 0.
    let mut axis: Vec<String> = budget
        .iter()
        .chain(act.iter())
        .map(|(p, _)| p.clone())
        .collect();
    axis.sort_by_key(|p| classify::period_sort_key(p));
    axis.dedup();

    let lookup = |agg: &[(String, f64)], period: &str| -> f64 {
        agg.iter()
            .find(|(p, _)| p == period)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    };
    let budget_values: Vec<f64> = axis.iter().map(|p| lookup(&budget, p)).collect();
    let act_values: Vec<f64> = axis.iter().map(|p| lookup(&act, p)).collect();

    let series = match chart {
        ChartKind::Pie => {
            // Two slices, the grand totals.
            let labels = vec!["Budget".to_string(), "Act".to_string()];
            let values = vec![
                budget_values.iter().sum::<f64>(),
                act_values.iter().sum::<f64>(),
            ];
            let (labels, values) = positive_slices(labels, values);
            vec![Series {
                name: None,
                labels,
                values,
                color: None,
            }]
        }
        ChartKind::Bar | ChartKind::Line => vec![
            Series {
                name: Some("Budget".to_string()),
                labels: axis.clone(),
                values: budget_values.clone(),
                color: Some(BUDGET_COLOR.to_string()),
            },
            Series {
                name: Some("Act".to_string()),
                labels: axis.clone(),
                values: act_values.clone(),
                color: Some(ACT_COLOR.to_string()),
            },
        ],
    };

    let rows = axis
        .iter()
        .enumerate()
        .map(|(i, period)| {
            vec![
                period.clone(),
                fmt::number(budget_values[i]),
                fmt::number(act_values[i]),
            ]
        })
        .collect();

    ViewResult {
        series,
        layout: Layout {
            title,
            x_title: "Month".to_string(),
            y_title: "Value".to_string(),
        },
        table: DataTable {
            columns: vec!["Month".into(), "Budget".into(), "Act".into()],
            rows,
        },
        summary: Vec::new(),
    }
}

fn is_excluded_dimension(value: &str) -> bool {
    let lower = value.to_lowercase();
    EXCLUDED_DIMENSIONS.iter().any(|t| lower.contains(t))
}

fn performance(
    table: &Table,
    state: &FilterState,
    dimension: &str,
    chart: ChartKind,
) -> ViewResult {
    let title = format!("{dimension} Performance (YTD Act)");
    let Some(column) = table
        .columns
        .iter()
        .find(|name| classify::is_ytd_act_column(name))
    else {
        return ViewResult::empty(&title);
    };
    let Some(first) = table.columns.first().cloned() else {
        return ViewResult::empty(&title);
    };

    // One point per record; total rows are dropped, the rest keep their
    // source order ranking by value.
    let mut points: Vec<(String, f64)> = Vec::new();
    for record in filter::filter_records(table, state) {
        let name = Table::value(record, &first).trimmed();
        if name.is_empty() || is_excluded_dimension(&name) {
            continue;
        }
        let Some(value) = Table::value(record, column).as_number() else {
            continue;
        };
        points.push((name, value));
    }
    if points.is_empty() {
        return ViewResult::empty(&title);
    }
    points.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = points.iter().map(|(_, v)| v).sum();
    let summary = vec![
        (format!("Top: {}", points[0].0), points[0].1),
        ("Total".to_string(), total),
        ("Average".to_string(), total / points.len() as f64),
    ];

    let table_out = periods_table(dimension, "Performance", &points);
    let series = shape_single(dimension, points, Some(ACT_COLOR.to_string()), chart);
    ViewResult {
        series: vec![series],
        layout: Layout {
            title,
            x_title: dimension.to_string(),
            y_title: "Performance".to_string(),
        },
        table: table_out,
        summary,
    }
}

fn monthwise(
    table: &Table,
    state: &FilterState,
    dimension: &str,
    chart: ChartKind,
) -> ViewResult {
    let title = format!("{dimension} Monthwise (Act)");
    let columns = metric_columns(table, MetricKind::Act);
    if columns.is_empty() {
        return ViewResult::empty(&title);
    }
    let records = filter::filter_records(table, state);
    let aggregated = aggregate(&melt(&records, &columns, state));
    if aggregated.is_empty() {
        return ViewResult::empty(&title);
    }

    let total: f64 = aggregated.iter().map(|(_, v)| v).sum();
    let best = aggregated
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .cloned()
        .unwrap_or_default();
    let summary = vec![
        (format!("Best: {}", best.0), best.1),
        ("Monthly Average".to_string(), total / aggregated.len() as f64),
        ("Total".to_string(), total),
    ];

    let table_out = periods_table("Month", "Act", &aggregated);
    let series = shape_single("Act", aggregated, Some(ACT_COLOR.to_string()), chart);
    ViewResult {
        series: vec![series],
        layout: Layout {
            title,
            x_title: "Month".to_string(),
            y_title: "Act".to_string(),
        },
        table: table_out,
        summary,
    }
}
