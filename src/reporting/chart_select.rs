//! Heuristic chart selection.

use crate::artifact::ChartKind;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn time_like_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)date|time|month|year|day").expect("time pattern"))
}

/// Pick a chart family for the given rows and analysis goal.
///
/// Trend-focused goals or time-like fields select a line chart; goals about
/// proportions select a pie chart; goals about relationships, correlation or
/// distribution - or plain two-column data - select a scatter plot; anything
/// else defaults to a bar chart for categorical comparison.
pub fn select_chart_kind(rows: &[Value], goal: &str) -> ChartKind {
    let goal = goal.to_lowercase();

    let has_time_like_field = rows.iter().any(|row| {
        row.as_object()
            .map(|obj| obj.keys().any(|key| time_like_pattern().is_match(key)))
            .unwrap_or(false)
    });

    let column_count = rows
        .first()
        .and_then(Value::as_object)
        .map(|obj| obj.len())
        .unwrap_or(0);

    if goal.contains("trend") || has_time_like_field {
        ChartKind::Line
    } else if goal.contains("proportion") || goal.contains("percentage") || goal.contains("share") {
        ChartKind::Pie
    } else if goal.contains("relationship")
        || goal.contains("correlation")
        || goal.contains("distribution")
        || column_count == 2
    {
        ChartKind::Scatter
    } else {
        ChartKind::Bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trend_goal_selects_line() {
        let rows = vec![json!({"region": "EMEA", "revenue": 1, "count": 2})];
        assert_eq!(select_chart_kind(&rows, "revenue trend by region"), ChartKind::Line);
    }

    #[test]
    fn test_time_like_field_selects_line() {
        let rows = vec![json!({"order_month": "2024-01", "revenue": 1, "count": 2})];
        assert_eq!(select_chart_kind(&rows, "compare revenue"), ChartKind::Line);
    }

    #[test]
    fn test_proportion_goal_selects_pie() {
        let rows = vec![json!({"dept": "Sales", "headcount": 10, "budget": 3})];
        assert_eq!(
            select_chart_kind(&rows, "share of headcount by department"),
            ChartKind::Pie
        );
    }

    #[test]
    fn test_correlation_goal_selects_scatter() {
        let rows = vec![json!({"a": 1, "b": 2, "c": 3})];
        assert_eq!(
            select_chart_kind(&rows, "correlation between spend and revenue"),
            ChartKind::Scatter
        );
    }

    #[test]
    fn test_two_columns_select_scatter() {
        let rows = vec![json!({"spend": 1, "revenue": 2})];
        assert_eq!(select_chart_kind(&rows, "compare these"), ChartKind::Scatter);
    }

    #[test]
    fn test_default_is_bar() {
        let rows = vec![json!({"region": "EMEA", "revenue": 1, "count": 2})];
        assert_eq!(select_chart_kind(&rows, "compare revenue by region"), ChartKind::Bar);
    }

    #[test]
    fn test_empty_rows_default_to_bar() {
        assert_eq!(select_chart_kind(&[], "anything"), ChartKind::Bar);
    }
}
