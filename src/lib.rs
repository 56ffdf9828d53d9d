//! Core of a Hebrew-language salary-benchmark tool: turn the markdown pipe
//! table an LLM returns into structured rows, recognize shekel amounts and
//! ranges inside free-text cells, and total the market-average and
//! employer-cost columns.
//!
//! The model output is only *asked* to be a table; nothing validates it
//! upstream. Every entry point here therefore degrades instead of failing:
//! prose in → empty table out, unreadable cell → excluded from the totals.

pub mod aggregate;
pub mod columns;
pub mod extract;
pub mod history;
pub mod snippets;

pub use aggregate::{aggregate, aggregate_table, ColumnTotal, CompensationSummary};
pub use columns::{ColumnRole, ResolvedColumns, RoleMap};
pub use extract::{parse_numeric_cell, parse_table, NumericCell, ParsedRow, ParsedTable};
pub use history::{ReportHistory, ReportRecord};
pub use snippets::{scan_snippets, source_display_name, SourceStats};
