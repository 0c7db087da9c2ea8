//! Artifacts extracted from tool results for downstream consumption.
//!
//! Visualization artifacts are produced whenever a tool result carries a
//! chart-shaped payload; exactly one terminal artifact (report, no-data or
//! clarification) settles a successful run.

mod extractor;

pub use extractor::{ArtifactExtractor, ExtractedArtifacts};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chart families the canvas can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Compare values across discrete categories.
    Bar,
    /// Highlight trends over continuous dimensions.
    Line,
    /// Show proportional contributions to a whole.
    Pie,
    /// Inspect correlation across two variables.
    Scatter,
    /// Filled trend chart.
    Area,
    /// Several mark types layered in one chart.
    Composed,
}

impl ChartKind {
    /// Get human-readable name for the chart kind.
    pub fn name(&self) -> &str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Area => "area",
            Self::Composed => "composed",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ChartKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "pie" => Ok(Self::Pie),
            "scatter" => Ok(Self::Scatter),
            "area" => Ok(Self::Area),
            "composed" => Ok(Self::Composed),
            _ => Err(anyhow::anyhow!("Invalid chart kind: {}", s)),
        }
    }
}

/// Axis and styling options attached to a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Field plotted on the x axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    /// Field, or list of fields, plotted on the y axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Value>,
    /// Series colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Whether to render a legend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<bool>,
    /// Whether to render grid lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    /// Whether to render tooltips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<bool>,
}

/// A renderable chart pulled out of a tool result.
///
/// Created once per qualifying tool result and immutable thereafter; the
/// presentation layer consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationArtifact {
    /// Chart family.
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered data records.
    pub data: Vec<Value>,
    /// Axis and styling options.
    #[serde(default)]
    pub config: ChartOptions,
}

/// The final business answer for a run that produced data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportArtifact {
    /// The SQL that was executed.
    pub sql: String,
    /// Business-facing narrative.
    pub narrative: String,
    /// Calibrated confidence in [0, 1].
    pub confidence: f64,
    /// Base64-encoded CSV of the (possibly truncated) result set.
    pub csv_base64: String,
    /// Small preview of the result rows.
    pub preview: Vec<Value>,
    /// Optional chart specification attached to the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_spec: Option<Value>,
}

/// Terminal outcome when the catalog cannot answer the question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoDataArtifact {
    /// Explanation shown to the user.
    pub message: String,
}

/// Terminal outcome when the question is too ambiguous to plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarificationArtifact {
    /// The clarifying question to put back to the user.
    pub question: String,
}

/// The one-of-three outcome of a cleanly completed run.
///
/// At most one terminal artifact exists per session; the session is complete
/// once one is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TerminalArtifact {
    /// A full report with SQL, narrative and data payloads.
    Report(ReportArtifact),
    /// No data could answer the question.
    NoData(NoDataArtifact),
    /// The user must clarify their intent first.
    Clarification(ClarificationArtifact),
}
