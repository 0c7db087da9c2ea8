//! Per-run mutable session state.

use crate::artifact::{TerminalArtifact, VisualizationArtifact};
use crate::step::Step;
use std::collections::HashSet;

/// Everything one run accumulates.
///
/// Owned exclusively by the session; no other component mutates it. Held in
/// memory for the lifetime of one run and torn down with it - there is no
/// process-wide store.
#[derive(Debug)]
pub struct SessionState {
    /// Unique id of this run.
    pub session_id: String,
    /// Number of steps taken so far.
    pub step_count: u32,
    /// Ordered step history.
    pub history: Vec<Step>,
    /// Dedup keys of tool results already scanned for artifacts.
    pub processed_artifacts: HashSet<String>,
    /// Conversation transcript handed to the model on each step.
    pub transcript: Vec<umf::InternalMessage>,
    /// Charts extracted so far, in observation order.
    pub visualizations: Vec<VisualizationArtifact>,
    /// The terminal artifact, once one has been observed.
    pub terminal: Option<TerminalArtifact>,
}

impl SessionState {
    /// Create fresh state seeded with the initial conversation.
    pub fn new(initial_messages: Vec<umf::InternalMessage>) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            step_count: 0,
            history: Vec::new(),
            processed_artifacts: HashSet::new(),
            transcript: initial_messages,
            visualizations: Vec::new(),
            terminal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = SessionState::new(vec![umf::InternalMessage::user("top customers by spend?")]);

        assert_eq!(state.step_count, 0);
        assert!(state.history.is_empty());
        assert!(state.processed_artifacts.is_empty());
        assert_eq!(state.transcript.len(), 1);
        assert!(state.terminal.is_none());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = SessionState::new(vec![]);
        let b = SessionState::new(vec![]);
        assert_ne!(a.session_id, b.session_id);
    }
}
