//! Phase state machine - the sole mutator of the current phase.

use crate::catalog::names;
use crate::phase::Phase;
use crate::step::Step;

/// Owns the current phase and advances it after each completed step.
///
/// The transition rule is evaluated against the entire step history, not
/// just the latest step, because tool results can arrive across step
/// boundaries. Transitions are monotonic and idempotent: re-evaluating with
/// the same history never moves the phase backward and produces the same
/// phase if already advanced.
///
/// Triggers:
/// - Planning → Building: a successful `FinalizePlan` result in history.
/// - Building → Execution: a successful `FinalizeBuild` result.
/// - Execution → Reporting: a successful `ExecuteSQLWithRepair` result.
#[derive(Debug, Clone)]
pub struct PhaseController {
    current: Phase,
}

impl PhaseController {
    /// Create a controller starting in the Planning phase.
    pub fn new() -> Self {
        Self {
            current: Phase::Planning,
        }
    }

    /// Get the current phase.
    pub fn current_phase(&self) -> Phase {
        self.current
    }

    /// Re-evaluate the transition rule over the full history.
    ///
    /// Returns the (possibly advanced) current phase. The phase is purely
    /// advisory metadata used by the gate on the next step.
    pub fn evaluate(&mut self, history: &[Step]) -> Phase {
        let target = Self::phase_for_history(history);
        if target > self.current {
            self.current = target;
        }
        self.current
    }

    fn phase_for_history(history: &[Step]) -> Phase {
        let has_result = |tool: &str| history.iter().any(|step| step.has_successful(tool));

        if has_result(names::EXECUTE_SQL_WITH_REPAIR) {
            Phase::Reporting
        } else if has_result(names::FINALIZE_BUILD) {
            Phase::Execution
        } else if has_result(names::FINALIZE_PLAN) {
            Phase::Building
        } else {
            Phase::Planning
        }
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{InvocationState, Step, ToolInvocation};
    use serde_json::json;

    fn step_with_result(phase: Phase, tool: &str) -> Step {
        Step::new(phase).with_invocation(ToolInvocation::available(
            "call_1",
            tool,
            json!({}),
            json!({"ok": true}),
        ))
    }

    fn step_with_error(phase: Phase, tool: &str) -> Step {
        Step::new(phase).with_invocation(ToolInvocation::errored(
            "call_1",
            tool,
            json!({}),
            "boom",
        ))
    }

    #[test]
    fn test_initial_phase() {
        let controller = PhaseController::new();
        assert_eq!(controller.current_phase(), Phase::Planning);
    }

    #[test]
    fn test_progression_through_all_phases() {
        let mut controller = PhaseController::new();
        let mut history = Vec::new();

        history.push(step_with_result(Phase::Planning, names::FINALIZE_PLAN));
        assert_eq!(controller.evaluate(&history), Phase::Building);

        history.push(step_with_result(Phase::Building, names::FINALIZE_BUILD));
        assert_eq!(controller.evaluate(&history), Phase::Execution);

        history.push(step_with_result(Phase::Execution, names::EXECUTE_SQL_WITH_REPAIR));
        assert_eq!(controller.evaluate(&history), Phase::Reporting);
    }

    #[test]
    fn test_monotonic_and_idempotent() {
        let mut controller = PhaseController::new();
        let history = vec![step_with_result(Phase::Planning, names::FINALIZE_PLAN)];

        assert_eq!(controller.evaluate(&history), Phase::Building);
        // Same history again: same answer, no regression.
        assert_eq!(controller.evaluate(&history), Phase::Building);
        // Empty history never moves the phase backward.
        assert_eq!(controller.evaluate(&[]), Phase::Building);
    }

    #[test]
    fn test_errored_result_does_not_advance() {
        let mut controller = PhaseController::new();
        let history = vec![step_with_error(Phase::Planning, names::FINALIZE_PLAN)];

        assert_eq!(controller.evaluate(&history), Phase::Planning);
    }

    #[test]
    fn test_later_trigger_wins_regardless_of_order() {
        let mut controller = PhaseController::new();
        // Execute-with-repair observed without explicit finalize steps in
        // history still lands the session in Reporting.
        let history = vec![step_with_result(Phase::Execution, names::EXECUTE_SQL_WITH_REPAIR)];

        assert_eq!(controller.evaluate(&history), Phase::Reporting);
    }
}
