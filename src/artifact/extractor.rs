//! Structural detection of renderable payloads in tool results.

use crate::artifact::{
    ChartKind, ChartOptions, ClarificationArtifact, NoDataArtifact, ReportArtifact,
    TerminalArtifact, VisualizationArtifact,
};
use crate::step::{InvocationState, Step};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Everything one pass over a step produced.
#[derive(Debug, Default, Clone)]
pub struct ExtractedArtifacts {
    /// Charts detected in tool outputs, in observation order.
    pub visualizations: Vec<VisualizationArtifact>,
    /// Terminal payload, if one of the invocations carried it.
    pub terminal: Option<TerminalArtifact>,
}

/// Stateless extraction of artifacts from tool results.
///
/// Payloads are inspected structurally, not by tool name, since multiple
/// tool names can produce chart-shaped output. Processed invocations are
/// keyed by `(step id, invocation index)` so re-observing a step stream
/// (reconnect, re-render, streaming snapshots) emits each artifact at most
/// once. Invocations that have not reached the available state are skipped
/// without being recorded: they must be scanned again once their output
/// arrives, even if they already carry partially-streamed text.
pub struct ArtifactExtractor;

impl ArtifactExtractor {
    /// Scan a step's invocations against the processed set.
    ///
    /// Keys for every settled invocation are recorded before returning,
    /// whether or not an artifact was produced, so empty or irrelevant tool
    /// results are not re-scanned. Malformed chart or terminal payloads are
    /// dropped silently; partial charting is acceptable.
    pub fn extract(step: &Step, processed: &mut HashSet<String>) -> ExtractedArtifacts {
        let mut extracted = ExtractedArtifacts::default();

        for (index, invocation) in step.invocations.iter().enumerate() {
            if invocation.state != InvocationState::Available {
                continue;
            }

            let key = Self::processed_key(&step.id, index);
            if processed.contains(&key) {
                continue;
            }

            if let Some(payload) = invocation.output.as_ref().and_then(Value::as_object) {
                Self::collect_visualizations(payload, &mut extracted.visualizations);

                if extracted.terminal.is_none() {
                    extracted.terminal = Self::parse_terminal(payload);
                }
            }

            processed.insert(key);
        }

        extracted
    }

    /// Dedup key for one invocation inside one step.
    pub fn processed_key(step_id: &str, invocation_index: usize) -> String {
        format!("{}:{}", step_id, invocation_index)
    }

    fn collect_visualizations(payload: &Map<String, Value>, out: &mut Vec<VisualizationArtifact>) {
        if let Some(single) = payload.get("visualization") {
            if let Some(artifact) = Self::parse_visualization(single) {
                out.push(artifact);
            }
        }

        if let Some(many) = payload.get("visualizations").and_then(Value::as_array) {
            for entry in many {
                if let Some(artifact) = Self::parse_visualization(entry) {
                    out.push(artifact);
                }
            }
        }
    }

    /// Parse one chart-shaped value: {type: string, title: string, data: array}.
    fn parse_visualization(value: &Value) -> Option<VisualizationArtifact> {
        let payload = value.as_object()?;

        let kind: ChartKind = payload.get("type")?.as_str()?.parse().ok()?;
        let title = payload.get("title")?.as_str()?.to_string();
        let data = payload.get("data")?.as_array()?.clone();

        let description = payload
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        let config: ChartOptions = payload
            .get("config")
            .and_then(|c| serde_json::from_value(c.clone()).ok())
            .unwrap_or_default();

        Some(VisualizationArtifact {
            kind,
            title,
            description,
            data,
            config,
        })
    }

    /// Parse a terminal payload, if the object matches one of the three
    /// terminal shapes.
    ///
    /// A report carries `narrative`, `sql` and `confidence` together. A
    /// clarification carries a `question`. A no-data result carries a
    /// `message` and explicitly neither `narrative` nor `sql` nor any chart
    /// field: chart-tool outputs also attach a human-readable `message`
    /// next to their `visualization`, and must not read as no-data.
    fn parse_terminal(payload: &Map<String, Value>) -> Option<TerminalArtifact> {
        let narrative = payload.get("narrative").and_then(Value::as_str);
        let sql = payload.get("sql").and_then(Value::as_str);

        if let (Some(narrative), Some(sql), Some(confidence)) =
            (narrative, sql, payload.get("confidence").and_then(Value::as_f64))
        {
            return Some(TerminalArtifact::Report(ReportArtifact {
                sql: sql.to_string(),
                narrative: narrative.to_string(),
                confidence: confidence.clamp(0.0, 1.0),
                csv_base64: payload
                    .get("csvBase64")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                preview: payload
                    .get("preview")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                chart_spec: payload
                    .get("vegaLite")
                    .filter(|v| !v.is_null())
                    .cloned(),
            }));
        }

        if let Some(question) = payload.get("question").and_then(Value::as_str) {
            return Some(TerminalArtifact::Clarification(ClarificationArtifact {
                question: question.to_string(),
            }));
        }

        let chart_shaped =
            payload.contains_key("visualization") || payload.contains_key("visualizations");
        if let Some(message) = payload.get("message").and_then(Value::as_str) {
            if narrative.is_none() && sql.is_none() && !chart_shaped {
                return Some(TerminalArtifact::NoData(NoDataArtifact {
                    message: message.to_string(),
                }));
            }
        }

        None
    }
}
