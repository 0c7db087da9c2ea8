//! Phase gate - pure mapping from phase to tool subset and directive.

use crate::catalog::{ToolCatalog, ToolDescriptor};
use crate::phase::Phase;
use std::sync::Arc;

/// Declares which tools are callable in a phase and the system directive to
/// attach for it.
///
/// The gate only declares the permitted set; rejecting a model that attempts
/// a tool outside it is the model-invocation collaborator's job. Both
/// methods are pure and deterministic.
#[derive(Debug, Clone)]
pub struct PhaseGate {
    catalog: Arc<ToolCatalog>,
}

impl PhaseGate {
    /// Create a gate over the given catalog.
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self { catalog }
    }

    /// The tools callable during the given phase, in catalog order.
    pub fn active_tools(&self, phase: Phase) -> Vec<ToolDescriptor> {
        self.catalog
            .tools_for_phase(phase)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The system directive for the given phase.
    ///
    /// Every directive ends with an explicit enumeration of the tool names
    /// callable in the phase.
    pub fn directive(&self, phase: Phase) -> String {
        let names: Vec<&str> = self
            .catalog
            .tools_for_phase(phase)
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();

        format!(
            "{}\n\nTools you may call in this phase: {}.",
            Self::preamble(phase),
            names.join(", ")
        )
    }

    fn preamble(phase: Phase) -> &'static str {
        match phase {
            Phase::Planning => {
                "You are the planning specialist. Explore the semantic catalog to \
                 decide whether the question can be answered from the available \
                 entities, then commit to a plan with FinalizePlan. If the catalog \
                 cannot answer the question, call FinalizeNoData with a short \
                 explanation. If the question is ambiguous, call ClarifyIntent with \
                 one precise question."
            }
            Phase::Building => {
                "You are the SQL building specialist. Draft the query for the \
                 committed plan with BuildSQL, check it with ValidateSQL, and commit \
                 to it with FinalizeBuild."
            }
            Phase::Execution => {
                "You are the execution manager. Estimate the query cost with \
                 EstimateCost when it could be expensive, then run the final query \
                 with ExecuteSQLWithRepair."
            }
            Phase::Reporting => {
                "You are the reporting specialist. Produce a concise, business-facing \
                 answer with supporting artifacts. Sanity-check the result rows, call \
                 FormatResults once to obtain the CSV payload and preview, generate a \
                 chart when the user asked for one, record the narrative and a \
                 confidence score between 0 and 1 with ExplainResults, and finish \
                 with FinalizeReport. Use plain business language; never mention \
                 internal tools, plan details or SQL in the narrative."
            }
        }
    }
}
