use serde::Serialize;
use tracing::debug;

use crate::columns::{ColumnRole, ResolvedColumns, RoleMap};
use crate::extract::numeric::parse_numeric_cell;
use crate::extract::table::ParsedTable;

// "סה"כ" opens a pre-existing summary row; both the gershayim and the ASCII
// quote spellings show up in model output.
const TOTAL_ROW_MARKERS: [&str; 2] = ["סה\u{05F4}כ", "סה\"כ"];

/// Outcome of totalling one column. Distinguishes a missing column from a
/// present-but-unparseable one and from a genuine zero total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ColumnTotal {
    ColumnNotFound,
    NoNumericValues,
    Total(f64),
}

impl ColumnTotal {
    pub fn value(&self) -> Option<f64> {
        match self {
            ColumnTotal::Total(v) => Some(*v),
            _ => None,
        }
    }
}

/// The two summary figures of a benchmark table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompensationSummary {
    /// Sum of per-component market-average values.
    pub gross: ColumnTotal,
    /// Sum of per-component employer-cost values.
    pub employer_cost: ColumnTotal,
}

/// Total the gross and employer-cost columns of `table` using roles already
/// resolved against its headers. Pure; call once per report.
pub fn aggregate_table(table: &ParsedTable, columns: &ResolvedColumns) -> CompensationSummary {
    let label_col = columns.index_of(ColumnRole::Label).unwrap_or(0);
    let summary = CompensationSummary {
        gross: total_column(table, columns.index_of(ColumnRole::Average), label_col),
        employer_cost: total_column(table, columns.index_of(ColumnRole::EmployerCost), label_col),
    };
    debug!(?summary, rows = table.rows.len(), "aggregated table");
    summary
}

/// Hint-based entry point: locate the two columns by header substring and
/// total them. The first column doubles as the label column.
pub fn aggregate(table: &ParsedTable, gross_hint: &str, cost_hint: &str) -> CompensationSummary {
    let roles = RoleMap::with_hints(gross_hint, cost_hint);
    aggregate_table(table, &roles.resolve(&table.headers))
}

fn total_column(table: &ParsedTable, column: Option<usize>, label_col: usize) -> ColumnTotal {
    let column = match column {
        Some(c) => c,
        None => return ColumnTotal::ColumnNotFound,
    };

    let mut sum = 0.0;
    let mut contributions = 0usize;
    for row in &table.rows {
        let label = row.get(label_col).map(String::as_str).unwrap_or("");
        if is_total_row(label) {
            continue;
        }
        let cell = match row.get(column) {
            Some(cell) => cell,
            None => continue,
        };
        if let Some(value) = parse_numeric_cell(cell) {
            sum += value;
            contributions += 1;
        }
    }

    if contributions == 0 {
        ColumnTotal::NoNumericValues
    } else {
        ColumnTotal::Total(sum)
    }
}

fn is_total_row(label: &str) -> bool {
    let label = label.trim_start();
    TOTAL_ROW_MARKERS
        .iter()
        .any(|marker| label.starts_with(marker))
}
