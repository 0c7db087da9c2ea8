//! Model step and tool invocation types.
//!
//! A step is one round of model invocation: some assistant text plus zero or
//! more tool calls. Steps are appended to the session history and drive both
//! phase transitions and termination.

use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state of a single tool invocation within a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationState {
    /// The call has been announced; its arguments are still streaming.
    Pending,
    /// Arguments are finalized; the tool has not produced output yet.
    Streaming,
    /// The tool produced its output.
    Available,
    /// The tool failed.
    Errored,
}

/// One tool call observed within a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Provider-assigned call id.
    pub id: String,
    /// Name of the invoked tool.
    pub tool_name: String,
    /// Arguments, as far as they have streamed.
    pub input: Value,
    /// Invocation lifecycle state.
    pub state: InvocationState,
    /// Tool output, present once the invocation is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// Error description, present once the invocation is errored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolInvocation {
    /// Create an announced invocation whose arguments are still streaming.
    pub fn pending(id: impl Into<String>, tool_name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            tool_name: tool_name.into(),
            input,
            state: InvocationState::Pending,
            output: None,
            error: None,
        }
    }

    /// Create an invocation with finalized arguments awaiting output.
    pub fn streaming(id: impl Into<String>, tool_name: impl Into<String>, input: Value) -> Self {
        Self {
            state: InvocationState::Streaming,
            ..Self::pending(id, tool_name, input)
        }
    }

    /// Create a settled invocation carrying its output.
    pub fn available(
        id: impl Into<String>,
        tool_name: impl Into<String>,
        input: Value,
        output: Value,
    ) -> Self {
        Self {
            state: InvocationState::Available,
            output: Some(output),
            ..Self::pending(id, tool_name, input)
        }
    }

    /// Create a failed invocation carrying its error description.
    pub fn errored(
        id: impl Into<String>,
        tool_name: impl Into<String>,
        input: Value,
        error: impl Into<String>,
    ) -> Self {
        Self {
            state: InvocationState::Errored,
            error: Some(error.into()),
            ..Self::pending(id, tool_name, input)
        }
    }

    /// Whether this invocation completed with output available.
    pub fn is_successful(&self) -> bool {
        self.state == InvocationState::Available && self.output.is_some()
    }
}

/// One round of model invocation, possibly containing multiple tool calls.
///
/// A step belongs to exactly one phase: the phase active when it was
/// requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Unique id for this step.
    pub id: String,
    /// Phase that was active when the step was requested.
    pub phase: Phase,
    /// Assistant text produced alongside the tool calls.
    #[serde(default)]
    pub text: String,
    /// Tool invocations observed in this step.
    #[serde(default)]
    pub invocations: Vec<ToolInvocation>,
}

impl Step {
    /// Create an empty step for the given phase with a fresh id.
    pub fn new(phase: Phase) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            phase,
            text: String::new(),
            invocations: Vec::new(),
        }
    }

    /// Set the assistant text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a tool invocation using builder pattern.
    pub fn with_invocation(mut self, invocation: ToolInvocation) -> Self {
        self.invocations.push(invocation);
        self
    }

    /// Iterate over the successful tool results in this step.
    pub fn successful_results(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.invocations.iter().filter(|i| i.is_successful())
    }

    /// Whether this step holds a successful result for the named tool.
    pub fn has_successful(&self, tool_name: &str) -> bool {
        self.successful_results().any(|i| i.tool_name == tool_name)
    }

    /// Names of all tools invoked in this step, in order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.invocations.iter().map(|i| i.tool_name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocation_states() {
        let pending = ToolInvocation::pending("c1", "SearchCatalog", json!({}));
        assert_eq!(pending.state, InvocationState::Pending);
        assert!(!pending.is_successful());

        let streaming = ToolInvocation::streaming("c1", "SearchCatalog", json!({"query": "rev"}));
        assert_eq!(streaming.state, InvocationState::Streaming);
        assert!(!streaming.is_successful());

        let available =
            ToolInvocation::available("c1", "SearchCatalog", json!({}), json!({"hits": []}));
        assert!(available.is_successful());

        let errored = ToolInvocation::errored("c1", "ExecuteSQLWithRepair", json!({}), "timeout");
        assert_eq!(errored.state, InvocationState::Errored);
        assert!(!errored.is_successful());
        assert_eq!(errored.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_has_successful() {
        let step = Step::new(Phase::Planning)
            .with_invocation(ToolInvocation::errored("c1", "FinalizePlan", json!({}), "nope"))
            .with_invocation(ToolInvocation::available(
                "c2",
                "SearchCatalog",
                json!({}),
                json!({"hits": 3}),
            ));

        assert!(step.has_successful("SearchCatalog"));
        assert!(!step.has_successful("FinalizePlan"));
    }

    #[test]
    fn test_step_ids_are_unique() {
        let a = Step::new(Phase::Planning);
        let b = Step::new(Phase::Planning);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serde_state_names() {
        let invocation = ToolInvocation::streaming("c1", "BuildSQL", json!({}));
        let json = serde_json::to_value(&invocation).unwrap();
        assert_eq!(json["state"], "streaming");
        // Absent output is omitted from the wire shape.
        assert!(json.get("output").is_none());
    }
}
