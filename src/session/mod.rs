//! Session orchestration - the step loop and its supporting policies.
//!
//! One `AgentSession` owns one run: it asks the phase gate for the active
//! tool subset, requests model steps, feeds results to the phase controller
//! and artifact extractor, and applies the termination policy after each
//! step. Sessions are fully independent of each other; each owns its state
//! and shares nothing mutable.

mod error;
mod runner;
mod state;
mod termination;

pub use error::SessionError;
pub use runner::{AgentSession, ArtifactSink, SessionConfig, SessionOutcome};
pub use state::SessionState;
pub use termination::TerminationPolicy;
