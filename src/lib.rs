//! askdb - phase-gated agent orchestration for natural-language data questions
//!
//! askdb drives a tool-calling language model through an ordered sequence of
//! restricted phases - Planning, Building, Execution, Reporting - to turn a
//! natural-language data question into a validated SQL query, its results
//! and a business narrative, optionally with charts.
//!
//! The crate is the control plane of that pipeline:
//!
//! - **`catalog`** - the authoritative mapping from tool names to phases and
//!   terminal flags
//! - **`phase`** - the phase state machine and the gate that restricts which
//!   tools each step may call
//! - **`step`** - the model step and tool invocation data model
//! - **`artifact`** - chart, report, no-data and clarification artifacts,
//!   and their extraction from tool results
//! - **`provider`** - the model-step collaborator interface
//! - **`session`** - the step loop tying it all together
//! - **`reporting`** - result-shaping helpers behind the reporting tools
//! - **`config`** - configuration and environment loading
//! - **`observability`** - session logging
//!
//! # Example
//!
//! ```ignore
//! use askdb::prelude::*;
//!
//! let session = AgentSession::new(
//!     my_step_provider,
//!     ToolCatalog::pipeline(),
//!     SessionConfig::default(),
//! );
//!
//! let outcome = session
//!     .run(vec![umf::InternalMessage::user("Top 5 customers by revenue?")])
//!     .await?;
//!
//! match outcome.artifact {
//!     TerminalArtifact::Report(report) => println!("{}", report.narrative),
//!     TerminalArtifact::NoData(no_data) => println!("{}", no_data.message),
//!     TerminalArtifact::Clarification(c) => println!("{}", c.question),
//! }
//! ```

#![warn(missing_docs)]

/// Artifacts extracted from tool results.
pub mod artifact;

/// Tool catalog: the single source of truth for tool/phase membership.
pub mod catalog;

/// Configuration management.
pub mod config;

/// Session logging.
pub mod observability;

/// Pipeline phases, gate and controller.
pub mod phase;

/// Model-step collaborator interface.
pub mod provider;

/// Result-shaping helpers for the reporting phase.
pub mod reporting;

/// Session orchestration.
pub mod session;

/// Model step data model.
pub mod step;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::artifact::{
        ArtifactExtractor, ChartKind, ClarificationArtifact, NoDataArtifact, ReportArtifact,
        TerminalArtifact, VisualizationArtifact,
    };
    pub use crate::catalog::{CatalogError, ToolCatalog, ToolDescriptor};
    pub use crate::config::{Configuration, ConfigurationLoader, EnvironmentLoader};
    pub use crate::observability::Logger;
    pub use crate::phase::{Phase, PhaseController, PhaseGate};
    pub use crate::provider::{StepProvider, StepRequest, StepStream};
    pub use crate::session::{
        AgentSession, ArtifactSink, SessionConfig, SessionError, SessionOutcome, TerminationPolicy,
    };
    pub use crate::step::{InvocationState, Step, ToolInvocation};
}
