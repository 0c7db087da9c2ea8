//! Quick QA over query results.

use crate::reporting::ColumnMeta;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of the worst issue found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic findings only.
    Low,
    /// Findings worth a caveat in the narrative.
    Med,
    /// Findings that likely invalidate the answer.
    High,
}

/// Outcome of a sanity pass over result rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanityReport {
    /// Human-readable findings, possibly empty.
    pub issues: Vec<String>,
    /// Severity of the worst finding; `Low` when there are none.
    pub severity: Severity,
}

/// Flag simple anomalies in result rows: empty results, columns missing
/// from the rows, fully-null columns and high null rates.
pub fn sanity_check(rows: &[Value], columns: &[ColumnMeta]) -> SanityReport {
    let mut issues = Vec::new();
    let mut severity = Severity::Low;

    let mut raise = |issues: &mut Vec<String>, severity: &mut Severity, level: Severity, issue: String| {
        issues.push(issue);
        if level > *severity {
            *severity = level;
        }
    };

    if rows.is_empty() {
        raise(
            &mut issues,
            &mut severity,
            Severity::High,
            "result set is empty".to_string(),
        );
        return SanityReport { issues, severity };
    }

    for column in columns {
        let mut present = 0usize;
        let mut nulls = 0usize;

        for row in rows {
            match row.get(&column.name) {
                None => {}
                Some(Value::Null) => {
                    present += 1;
                    nulls += 1;
                }
                Some(_) => present += 1,
            }
        }

        if present == 0 {
            raise(
                &mut issues,
                &mut severity,
                Severity::Med,
                format!("column '{}' is missing from the rows", column.name),
            );
        } else if nulls == present {
            raise(
                &mut issues,
                &mut severity,
                Severity::Med,
                format!("column '{}' is entirely null", column.name),
            );
        } else if nulls * 2 > present {
            raise(
                &mut issues,
                &mut severity,
                Severity::Low,
                format!(
                    "column '{}' is more than half null ({} of {} rows)",
                    column.name, nulls, present
                ),
            );
        }
    }

    SanityReport { issues, severity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnMeta> {
        vec![
            ColumnMeta::new("region", "TEXT"),
            ColumnMeta::new("revenue", "NUMBER"),
        ]
    }

    #[test]
    fn test_clean_rows() {
        let rows = vec![json!({"region": "EMEA", "revenue": 10})];
        let report = sanity_check(&rows, &columns());

        assert!(report.issues.is_empty());
        assert_eq!(report.severity, Severity::Low);
    }

    #[test]
    fn test_empty_result_is_high() {
        let report = sanity_check(&[], &columns());

        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.issues, vec!["result set is empty"]);
    }

    #[test]
    fn test_all_null_column() {
        let rows = vec![
            json!({"region": "EMEA", "revenue": null}),
            json!({"region": "APAC", "revenue": null}),
        ];
        let report = sanity_check(&rows, &columns());

        assert_eq!(report.severity, Severity::Med);
        assert!(report.issues.iter().any(|i| i.contains("entirely null")));
    }

    #[test]
    fn test_high_null_rate() {
        let rows = vec![
            json!({"region": "EMEA", "revenue": 1}),
            json!({"region": "APAC", "revenue": null}),
            json!({"region": "AMER", "revenue": null}),
        ];
        let report = sanity_check(&rows, &columns());

        assert_eq!(report.severity, Severity::Low);
        assert!(report.issues.iter().any(|i| i.contains("more than half null")));
    }

    #[test]
    fn test_missing_column() {
        let rows = vec![json!({"region": "EMEA"})];
        let report = sanity_check(&rows, &columns());

        assert_eq!(report.severity, Severity::Med);
        assert!(report.issues.iter().any(|i| i.contains("missing from the rows")));
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Med).unwrap();
        assert_eq!(json, "\"med\"");
    }
}
