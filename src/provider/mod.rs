//! Model-step collaborator interface.
//!
//! The orchestrator treats the language model as a black box: it hands over
//! the conversation, the phase-gated tool subset and the system directive,
//! and receives back one step - streamed as a series of snapshots or
//! batched as a single settled step.

use crate::phase::Phase;
use crate::step::Step;
use anyhow::Result;
use async_trait::async_trait;
use futures_util::stream;
use futures_util::Stream;
use std::pin::Pin;

/// What the orchestrator hands the model for one step.
#[derive(Clone)]
pub struct StepRequest {
    /// Conversation so far, in universal message format.
    pub messages: Vec<umf::InternalMessage>,
    /// Phase active when this step was requested.
    pub phase: Phase,
    /// Wire schemas of the tools callable in this step.
    pub active_tools: Vec<umf::Tool>,
    /// System directive for the active phase.
    pub system_directive: String,
    /// Token budget for the step.
    pub max_tokens: u32,
}

impl StepRequest {
    /// Names of the active tools, in order.
    pub fn active_tool_names(&self) -> Vec<&str> {
        self.active_tools
            .iter()
            .map(|t| t.function.name.as_str())
            .collect()
    }
}

/// A stream of step snapshots; the final item is the settled step.
///
/// Snapshots share the step id; invocations may appear first as pending or
/// streaming and settle to available or errored in later snapshots. The
/// session extracts artifacts from every snapshot, relying on the processed
/// set for at-most-once emission.
pub type StepStream = Pin<Box<dyn Stream<Item = Result<Step>> + Send>>;

/// Produces model steps under a tool restriction.
///
/// Implementations own prompt construction, token generation and the actual
/// tool execution; the orchestrator only consumes the resulting step shape.
/// Rejecting calls to tools outside `active_tools` is the implementation's
/// responsibility.
#[async_trait]
pub trait StepProvider: Send + Sync {
    /// Request the next model step.
    async fn next_step(&self, request: StepRequest) -> Result<StepStream>;

    /// Get provider name for logging.
    fn provider_name(&self) -> &str;

    /// Get default model name.
    fn model_name(&self) -> &str;
}

/// Wrap a fully settled step as a single-snapshot stream.
pub fn batched(step: Step) -> StepStream {
    Box::pin(stream::once(async move { Ok(step) }))
}

/// Wrap a series of snapshots of one step as a stream.
pub fn snapshots(steps: Vec<Step>) -> StepStream {
    Box::pin(stream::iter(steps.into_iter().map(Ok)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolCatalog;
    use futures_util::StreamExt;

    #[test]
    fn test_active_tool_names() {
        let catalog = ToolCatalog::pipeline();
        let request = StepRequest {
            messages: vec![],
            phase: Phase::Building,
            active_tools: catalog
                .tools_for_phase(Phase::Building)
                .into_iter()
                .map(|d| d.to_tool())
                .collect(),
            system_directive: String::new(),
            max_tokens: 4000,
        };

        assert_eq!(
            request.active_tool_names(),
            vec!["BuildSQL", "ValidateSQL", "FinalizeBuild"]
        );
    }

    #[test]
    fn test_batched_yields_one_snapshot() {
        let step = Step::new(Phase::Planning);
        let collected = tokio_test::block_on(async { batched(step).collect::<Vec<_>>().await });
        assert_eq!(collected.len(), 1);
        assert!(collected[0].is_ok());
    }

    #[test]
    fn test_snapshots_preserve_order() {
        let a = Step::new(Phase::Planning).with_text("first");
        let b = Step::new(Phase::Planning).with_text("second");
        let collected =
            tokio_test::block_on(async { snapshots(vec![a, b]).collect::<Vec<_>>().await });

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1].as_ref().unwrap().text, "second");
    }
}
