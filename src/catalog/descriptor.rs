//! Tool descriptor type for representing phase-gated tools.

use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Static description of one tool the model may call.
///
/// The orchestrator never inspects a tool's business semantics; a descriptor
/// carries exactly what the control logic needs: the name the model calls it
/// by, the phase during which it is callable, whether its successful result
/// ends the session, and the parameter schema forwarded to the model.
///
/// # Example
///
/// ```
/// use askdb::catalog::ToolDescriptor;
/// use askdb::phase::Phase;
/// use serde_json::json;
///
/// let descriptor = ToolDescriptor::new(
///     "SearchCatalog",
///     "Search the semantic catalog for entities matching a query",
///     json!({
///         "type": "object",
///         "properties": {
///             "query": { "type": "string" }
///         },
///         "required": ["query"]
///     }),
///     Phase::Planning,
/// );
///
/// assert_eq!(descriptor.phase, Phase::Planning);
/// assert!(!descriptor.terminal);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name the model uses to invoke this tool.
    pub name: String,

    /// Human-readable description for model consumption.
    pub description: String,

    /// JSON Schema describing the parameters this tool accepts.
    pub parameters: Value,

    /// The phase during which the model may call this tool.
    pub phase: Phase,

    /// Whether a successful result for this tool ends the session.
    pub terminal: bool,
}

impl ToolDescriptor {
    /// Create a new, non-terminal tool descriptor.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        phase: Phase,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            phase,
            terminal: false,
        }
    }

    /// Create a descriptor with default empty parameters.
    pub fn new_simple(
        name: impl Into<String>,
        description: impl Into<String>,
        phase: Phase,
    ) -> Self {
        Self::new(
            name,
            description,
            json!({
                "type": "object",
                "properties": {}
            }),
            phase,
        )
    }

    /// Mark this tool as terminal using builder pattern.
    pub fn with_terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Convert to the wire tool schema handed to the model collaborator.
    pub fn to_tool(&self) -> umf::Tool {
        umf::Tool {
            r#type: "function".to_string(),
            function: umf::Function {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters: self.parameters.clone(),
            },
        }
    }
}
