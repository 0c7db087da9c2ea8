//! CSV packaging for query results.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of rows included in the CSV payload.
pub const MAX_CSV_ROWS: usize = 1000;

/// Number of rows included in the preview array.
pub const PREVIEW_ROWS: usize = 20;

/// Column name/type pair describing result columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name as returned by the executor.
    pub name: String,
    /// Column type label.
    #[serde(rename = "type")]
    pub column_type: String,
}

impl ColumnMeta {
    /// Create a column descriptor.
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// CSV payload plus preview, with truncation flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedResults {
    /// Base64-encoded CSV of the (possibly truncated) rows.
    pub csv_base64: String,
    /// First rows of the result set, as records.
    pub preview: Vec<Value>,
    /// Whether the CSV was limited to `MAX_CSV_ROWS`.
    pub truncated: bool,
    /// Row count before truncation.
    pub total_rows: usize,
}

/// Convert result rows/columns into a Base64 CSV and a small preview.
///
/// The CSV is capped at `MAX_CSV_ROWS` rows; `truncated` and `total_rows`
/// let the narrative mention the cap. Fields are escaped per RFC 4180:
/// values containing commas, quotes or newlines are quoted, quotes doubled.
pub fn format_results(rows: &[Value], columns: &[ColumnMeta]) -> FormattedResults {
    let total_rows = rows.len();
    let truncated = total_rows > MAX_CSV_ROWS;
    let limited = &rows[..total_rows.min(MAX_CSV_ROWS)];

    let mut csv = String::new();
    let header: Vec<String> = columns.iter().map(|c| escape_field(&c.name)).collect();
    csv.push_str(&header.join(","));
    csv.push('\n');

    for row in limited {
        let fields: Vec<String> = columns
            .iter()
            .map(|column| escape_field(&field_text(row, &column.name)))
            .collect();
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }

    FormattedResults {
        csv_base64: BASE64.encode(csv),
        preview: limited.iter().take(PREVIEW_ROWS).cloned().collect(),
        truncated,
        total_rows,
    }
}

fn field_text(row: &Value, column: &str) -> String {
    match row.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
