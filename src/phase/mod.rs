//! Pipeline phases and phase-gated tool access.

mod controller;
mod gate;

pub use controller::PhaseController;
pub use gate::PhaseGate;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A stage of the answer pipeline restricting which tools the model may call.
///
/// Phases are totally ordered for forward progress; no backward transitions
/// are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Explore the semantic catalog and commit to a query plan.
    Planning,
    /// Draft and validate the SQL query.
    Building,
    /// Estimate cost and execute the query.
    Execution,
    /// Shape results, narrate the answer and produce charts.
    Reporting,
}

impl Phase {
    /// Get human-readable name for the phase.
    pub fn name(&self) -> &str {
        match self {
            Self::Planning => "planning",
            Self::Building => "building",
            Self::Execution => "execution",
            Self::Reporting => "reporting",
        }
    }

    /// Position of the phase in the forward order, starting at 0.
    pub fn index(&self) -> usize {
        match self {
            Self::Planning => 0,
            Self::Building => 1,
            Self::Execution => 2,
            Self::Reporting => 3,
        }
    }

    /// All phases in forward order.
    pub fn all() -> [Phase; 4] {
        [Self::Planning, Self::Building, Self::Execution, Self::Reporting]
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Phase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(Phase::Planning),
            "building" => Ok(Phase::Building),
            "execution" => Ok(Phase::Execution),
            "reporting" => Ok(Phase::Reporting),
            _ => Err(anyhow::anyhow!("Invalid phase: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ordering() {
        assert!(Phase::Planning < Phase::Building);
        assert!(Phase::Building < Phase::Execution);
        assert!(Phase::Execution < Phase::Reporting);
    }

    #[test]
    fn test_phase_index() {
        for (i, phase) in Phase::all().iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for phase in Phase::all() {
            let parsed: Phase = phase.name().parse().unwrap();
            assert_eq!(parsed, phase);
        }
        assert!("deploying".parse::<Phase>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Phase::Execution).unwrap();
        assert_eq!(json, "\"execution\"");
    }
}
