//! Error types for the catalog module.

use thiserror::Error;

/// Errors raised by catalog lookups and registration.
///
/// An `UnknownTool` error means the model invoked a tool name that no phase
/// declares; it indicates drift between the model's declared tool set and
/// the orchestrator's phase table and must be surfaced, never swallowed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The observed tool name is absent from the catalog.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// Name of the tool that was not found.
        name: String,
    },

    /// A tool with the same name is already registered.
    #[error("tool already registered: {name}")]
    DuplicateName {
        /// Name of the duplicate tool.
        name: String,
    },
}

impl CatalogError {
    /// Create an UnknownTool error for the given tool name.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create a DuplicateName error for the given tool name.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }
}
