//! Error types for session runs.

use crate::catalog::CatalogError;
use thiserror::Error;

/// Failures that abort a session.
///
/// Fatal errors carry no partial terminal artifact; the caller should map
/// them to a single generic "could not complete this request" outcome,
/// distinguishable from the three normal terminal outcomes.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The model invoked a tool absent from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The step ceiling was reached without a terminal tool result.
    #[error("step budget exceeded after {steps} steps")]
    StepBudgetExceeded {
        /// Number of steps taken before the stop.
        steps: u32,
    },

    /// The model-step collaborator failed permanently.
    #[error("model step failed: {0}")]
    Provider(anyhow::Error),

    /// A terminal tool succeeded but its payload matched no terminal shape.
    #[error("terminal tool produced no usable artifact")]
    MalformedTerminalPayload,

    /// The caller abandoned the session.
    #[error("session cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_passes_through() {
        let error = SessionError::from(CatalogError::unknown_tool("DropTable"));
        assert!(error.to_string().contains("DropTable"));
        assert!(matches!(
            error,
            SessionError::Catalog(CatalogError::UnknownTool { .. })
        ));
    }

    #[test]
    fn test_budget_message_names_step_count() {
        let error = SessionError::StepBudgetExceeded { steps: 100 };
        assert!(error.to_string().contains("100"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionError>();
    }
}
