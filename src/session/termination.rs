//! Termination policy - when is a run finished.

use crate::catalog::ToolCatalog;
use crate::step::Step;
use std::sync::Arc;

/// Decides, after each step, whether the run is complete or must be
/// force-stopped for budget reasons.
///
/// Completion and budget are independent: completion is a clean end
/// (a terminal tool succeeded, possibly before the final phase transition
/// ever fired), the ceiling is a fatal stop bounding cost and latency.
#[derive(Debug, Clone)]
pub struct TerminationPolicy {
    catalog: Arc<ToolCatalog>,
    step_ceiling: u32,
}

impl TerminationPolicy {
    /// Default step ceiling for a run.
    pub const DEFAULT_STEP_CEILING: u32 = 100;

    /// Create a policy over the given catalog.
    pub fn new(catalog: Arc<ToolCatalog>, step_ceiling: u32) -> Self {
        Self {
            catalog,
            step_ceiling,
        }
    }

    /// The configured ceiling.
    pub fn step_ceiling(&self) -> u32 {
        self.step_ceiling
    }

    /// True iff history contains a successful result for a terminal tool.
    pub fn is_complete(&self, history: &[Step]) -> bool {
        history
            .iter()
            .flat_map(Step::successful_results)
            .any(|invocation| {
                self.catalog
                    .get(&invocation.tool_name)
                    .map(|d| d.terminal)
                    .unwrap_or(false)
            })
    }

    /// True once the step count has reached the ceiling.
    pub fn budget_exhausted(&self, step_count: u32) -> bool {
        step_count >= self.step_ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::names;
    use crate::phase::Phase;
    use crate::step::ToolInvocation;
    use serde_json::json;

    fn policy() -> TerminationPolicy {
        TerminationPolicy::new(
            Arc::new(ToolCatalog::pipeline()),
            TerminationPolicy::DEFAULT_STEP_CEILING,
        )
    }

    fn step_with_result(tool: &str) -> Step {
        Step::new(Phase::Planning).with_invocation(ToolInvocation::available(
            "call_1",
            tool,
            json!({}),
            json!({}),
        ))
    }

    #[test]
    fn test_complete_on_each_terminal_tool() {
        let policy = policy();

        for tool in [names::FINALIZE_REPORT, names::FINALIZE_NO_DATA, names::CLARIFY_INTENT] {
            assert!(policy.is_complete(&[step_with_result(tool)]), "{}", tool);
        }
    }

    #[test]
    fn test_not_complete_on_non_terminal_results() {
        let policy = policy();
        let history = vec![
            step_with_result(names::FINALIZE_PLAN),
            step_with_result(names::FINALIZE_BUILD),
            step_with_result(names::EXECUTE_SQL_WITH_REPAIR),
        ];

        assert!(!policy.is_complete(&history));
    }

    #[test]
    fn test_errored_terminal_tool_does_not_complete() {
        let policy = policy();
        let step = Step::new(Phase::Planning).with_invocation(ToolInvocation::errored(
            "call_1",
            names::FINALIZE_REPORT,
            json!({}),
            "validation failed",
        ));

        assert!(!policy.is_complete(&[step]));
    }

    #[test]
    fn test_budget_boundary() {
        let policy = TerminationPolicy::new(Arc::new(ToolCatalog::pipeline()), 100);

        assert!(!policy.budget_exhausted(99));
        assert!(policy.budget_exhausted(100));
        assert!(policy.budget_exhausted(101));
    }
}
