//! Agent session - composition root for the step loop.

use crate::artifact::{ArtifactExtractor, TerminalArtifact, VisualizationArtifact};
use crate::catalog::ToolCatalog;
use crate::config::Configuration;
use crate::observability::Logger;
use crate::phase::{Phase, PhaseController, PhaseGate};
use crate::provider::{StepProvider, StepRequest};
use crate::session::{SessionError, SessionState, TerminationPolicy};
use crate::step::{InvocationState, Step};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Receives artifacts as the session produces them.
///
/// The presentation layer implements this to render incrementally; the
/// orchestrator pushes and makes no assumption about rendering cadence.
pub trait ArtifactSink: Send + Sync {
    /// A chart was extracted from a tool result.
    fn on_visualization(&self, artifact: &VisualizationArtifact);

    /// A terminal artifact settled the run.
    fn on_terminal(&self, artifact: &TerminalArtifact);
}

/// Tunables for one session run.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hard ceiling on the number of steps before a fatal stop.
    pub step_ceiling: u32,
    /// Token budget per model step.
    pub max_tokens: u32,
    /// Retries for failed model steps (exponential backoff).
    pub max_retries: u32,
    /// Optional throttle between model steps, in seconds.
    pub request_interval_seconds: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_ceiling: TerminationPolicy::DEFAULT_STEP_CEILING,
            max_tokens: 4000,
            max_retries: 3,
            request_interval_seconds: None,
        }
    }
}

impl From<&Configuration> for SessionConfig {
    fn from(config: &Configuration) -> Self {
        Self {
            step_ceiling: config.execution.step_ceiling,
            max_tokens: config.execution.max_tokens,
            max_retries: config.execution.max_retries,
            request_interval_seconds: config.execution.request_interval_seconds,
        }
    }
}

/// Everything a completed run hands to the caller.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// The terminal artifact: report, no-data or clarification.
    pub artifact: TerminalArtifact,
    /// All charts extracted during the run, in observation order.
    pub visualizations: Vec<VisualizationArtifact>,
    /// Number of steps taken.
    pub steps: u32,
    /// Phase the session ended in.
    pub final_phase: Phase,
}

/// Drives one run of the phase-gated answer pipeline.
///
/// The loop is strictly sequential: the next step is never requested before
/// the previous one's tool results are fully reduced into session state,
/// because the gate's restriction for step N+1 depends on everything
/// observed through step N. Suspension happens only at the model-step
/// boundary.
pub struct AgentSession<P: StepProvider> {
    provider: P,
    catalog: Arc<ToolCatalog>,
    gate: PhaseGate,
    controller: PhaseController,
    termination: TerminationPolicy,
    config: SessionConfig,
    logger: Option<Logger>,
    sink: Option<Box<dyn ArtifactSink>>,
    cancel: CancellationToken,
}

impl<P: StepProvider> AgentSession<P> {
    /// Create a session over the given provider and catalog.
    pub fn new(provider: P, catalog: ToolCatalog, config: SessionConfig) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            provider,
            gate: PhaseGate::new(catalog.clone()),
            controller: PhaseController::new(),
            termination: TerminationPolicy::new(catalog.clone(), config.step_ceiling),
            catalog,
            config,
            logger: None,
            sink: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a session logger (optional).
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Attach an artifact sink (optional).
    pub fn with_artifact_sink(mut self, sink: Box<dyn ArtifactSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Attach a cancellation token (optional).
    ///
    /// Cancellation is cooperative: the session stops at the next safe
    /// point, and partially-streamed tool arguments are never treated as
    /// finalized results.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Current phase (advisory metadata for the next step).
    pub fn current_phase(&self) -> Phase {
        self.controller.current_phase()
    }

    /// Run the session to its terminal artifact.
    ///
    /// Fails with `StepBudgetExceeded` if the ceiling is hit without a
    /// terminal result, and with `Catalog(UnknownTool)` if the model
    /// invokes a tool outside any declared phase's set.
    pub async fn run(
        mut self,
        initial_messages: Vec<umf::InternalMessage>,
    ) -> Result<SessionOutcome, SessionError> {
        let mut state = SessionState::new(initial_messages);

        self.log(|logger| {
            logger.log_session_start(
                &state.session_id,
                self.provider.provider_name(),
                self.provider.model_name(),
            )
        });

        loop {
            if self.cancel.is_cancelled() {
                return Err(SessionError::Cancelled);
            }

            let phase = self.controller.current_phase();
            let request = self.build_request(phase, &state);

            if let Some(interval) = self.config.request_interval_seconds {
                if interval > 0 {
                    tokio::time::sleep(Duration::from_secs(interval)).await;
                }
            }

            let step = self.next_step_with_retry(request, &mut state).await?;
            state.step_count += 1;

            self.log(|logger| logger.log_step(state.step_count, phase, &step.tool_names()));
            for invocation in &step.invocations {
                if invocation.state == InvocationState::Errored {
                    self.log(|logger| {
                        logger.log_tool_error(
                            &invocation.tool_name,
                            invocation.error.as_deref().unwrap_or("unknown error"),
                        )
                    });
                }
            }

            Self::record_transcript(&mut state, &step);
            state.history.push(step);

            let current = self.controller.evaluate(&state.history);
            if current != phase {
                self.log(|logger| logger.log_phase_transition(phase, current));
            }

            if self.termination.is_complete(&state.history) {
                let artifact = state
                    .terminal
                    .clone()
                    .ok_or(SessionError::MalformedTerminalPayload)?;

                if let Some(sink) = &self.sink {
                    sink.on_terminal(&artifact);
                }
                self.log(|logger| {
                    logger.log_completion(&format!(
                        "terminal result after {} steps",
                        state.step_count
                    ))
                });

                return Ok(SessionOutcome {
                    artifact,
                    visualizations: state.visualizations,
                    steps: state.step_count,
                    final_phase: current,
                });
            }

            if self.termination.budget_exhausted(state.step_count) {
                self.log(|logger| {
                    logger.log_error(&format!(
                        "step budget of {} exhausted without a terminal result",
                        self.termination.step_ceiling()
                    ))
                });
                return Err(SessionError::StepBudgetExceeded {
                    steps: state.step_count,
                });
            }
        }
    }

    fn build_request(&self, phase: Phase, state: &SessionState) -> StepRequest {
        StepRequest {
            messages: state.transcript.clone(),
            phase,
            active_tools: self
                .gate
                .active_tools(phase)
                .iter()
                .map(|d| d.to_tool())
                .collect(),
            system_directive: self.gate.directive(phase),
            max_tokens: self.config.max_tokens,
        }
    }

    /// Request a step, retrying transient provider failures with
    /// exponential backoff. Catalog and cancellation errors are not retried.
    async fn next_step_with_retry(
        &self,
        request: StepRequest,
        state: &mut SessionState,
    ) -> Result<Step, SessionError> {
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..=self.config.max_retries {
            match self.observe_step(request.clone(), state).await {
                Ok(step) => return Ok(step),
                Err(SessionError::Provider(e)) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        tokio::time::sleep(Duration::from_secs(2u64.pow(attempt))).await;
                    }
                }
                Err(fatal) => return Err(fatal),
            }
        }

        Err(SessionError::Provider(last_error.unwrap_or_else(|| {
            anyhow::anyhow!("unknown model step error")
        })))
    }

    /// Reduce one step's snapshot stream into session state.
    ///
    /// Every snapshot is validated against the catalog and scanned for
    /// artifacts; the processed set guarantees at-most-once emission even
    /// when the same invocation is observed in several snapshots.
    async fn observe_step(
        &self,
        request: StepRequest,
        state: &mut SessionState,
    ) -> Result<Step, SessionError> {
        let mut stream = tokio::select! {
            _ = self.cancel.cancelled() => return Err(SessionError::Cancelled),
            result = self.provider.next_step(request) => {
                result.map_err(SessionError::Provider)?
            }
        };

        let mut latest: Option<Step> = None;

        loop {
            let snapshot = tokio::select! {
                _ = self.cancel.cancelled() => return Err(SessionError::Cancelled),
                item = stream.next() => match item {
                    Some(result) => result.map_err(SessionError::Provider)?,
                    None => break,
                },
            };

            for invocation in &snapshot.invocations {
                self.catalog.ensure_known(&invocation.tool_name)?;
            }

            let extracted = ArtifactExtractor::extract(&snapshot, &mut state.processed_artifacts);
            for chart in extracted.visualizations {
                if let Some(sink) = &self.sink {
                    sink.on_visualization(&chart);
                }
                state.visualizations.push(chart);
            }
            if state.terminal.is_none() {
                if let Some(terminal) = extracted.terminal {
                    state.terminal = Some(terminal);
                }
            }

            latest = Some(snapshot);
        }

        latest.ok_or_else(|| {
            SessionError::Provider(anyhow::anyhow!("model step stream yielded no step"))
        })
    }

    /// Append the settled step to the conversation transcript.
    ///
    /// Errored invocations record their error text so later phases can
    /// mention the failure gracefully; unsettled invocations are skipped.
    fn record_transcript(state: &mut SessionState, step: &Step) {
        let text = if step.text.is_empty() && !step.invocations.is_empty() {
            format!("Calling tools: {}", step.tool_names().join(", "))
        } else {
            step.text.clone()
        };
        if !text.is_empty() {
            state.transcript.push(umf::InternalMessage::assistant(&text));
        }

        for invocation in &step.invocations {
            let content = match invocation.state {
                InvocationState::Available => invocation
                    .output
                    .as_ref()
                    .map(|v| serde_json::to_string(v).unwrap_or_default())
                    .unwrap_or_default(),
                InvocationState::Errored => format!(
                    "Error: {}",
                    invocation.error.as_deref().unwrap_or("unknown error")
                ),
                _ => continue,
            };

            state.transcript.push(umf::InternalMessage::tool_result(
                &invocation.id,
                &invocation.tool_name,
                &content,
            ));
        }
    }

    fn log<F>(&self, write: F)
    where
        F: FnOnce(&Logger) -> anyhow::Result<()>,
    {
        if let Some(logger) = &self.logger {
            if let Err(e) = write(logger) {
                eprintln!("Warning: failed to write session log: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{batched, StepStream};
    use async_trait::async_trait;

    struct IdleProvider;

    #[async_trait]
    impl StepProvider for IdleProvider {
        async fn next_step(&self, request: StepRequest) -> anyhow::Result<StepStream> {
            Ok(batched(Step::new(request.phase)))
        }

        fn provider_name(&self) -> &str {
            "idle"
        }

        fn model_name(&self) -> &str {
            "idle-model"
        }
    }

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.step_ceiling, 100);
        assert_eq!(config.max_retries, 3);
        assert!(config.request_interval_seconds.is_none());
    }

    #[test]
    fn test_session_config_from_configuration() {
        let mut configuration = Configuration::default();
        configuration.execution.step_ceiling = 25;
        configuration.execution.max_tokens = 1000;

        let config = SessionConfig::from(&configuration);
        assert_eq!(config.step_ceiling, 25);
        assert_eq!(config.max_tokens, 1000);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_step() {
        let token = CancellationToken::new();
        token.cancel();

        let session = AgentSession::new(
            IdleProvider,
            ToolCatalog::pipeline(),
            SessionConfig::default(),
        )
        .with_cancellation(token);

        let result = session.run(vec![]).await;
        assert!(matches!(result, Err(SessionError::Cancelled)));
    }

    #[tokio::test]
    async fn test_initial_phase_is_planning() {
        let session = AgentSession::new(
            IdleProvider,
            ToolCatalog::pipeline(),
            SessionConfig::default(),
        );
        assert_eq!(session.current_phase(), Phase::Planning);
    }
}
