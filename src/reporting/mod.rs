//! Result-shaping helpers behind the reporting-phase tools.
//!
//! These implement the thin business logic of `FormatResults`,
//! `SanityCheck` and `autoSelectVisualization`: CSV packaging with a
//! preview, quick anomaly checks over result rows, and heuristic chart
//! selection.

mod chart_select;
mod csv;
mod sanity;

pub use chart_select::select_chart_kind;
pub use csv::{format_results, ColumnMeta, FormattedResults, MAX_CSV_ROWS, PREVIEW_ROWS};
pub use sanity::{sanity_check, SanityReport, Severity};
