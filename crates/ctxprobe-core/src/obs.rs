//! Tracing initialisation and structured lifecycle events.
//!
//! Binaries call [`init_tracing`] once at startup. Experiment code emits
//! lifecycle events through the `emit_*` helpers so log consumers see a
//! stable `event = ...` field across the run.

use tracing::{info, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Respects `RUST_LOG` for fine-grained filtering; `level` applies when it
/// is unset. `json` switches to newline-delimited JSON log lines. Safe to
/// call more than once; only the first call takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .ok();
    } else {
        registry
            .with(fmt::layer().with_target(false))
            .try_init()
            .ok();
    }
}

/// RAII guard that scopes all tracing output to one agent execution.
pub struct AgentSpan {
    _span: tracing::span::EnteredSpan,
}

impl AgentSpan {
    pub fn enter(agent: &str) -> Self {
        let span = tracing::info_span!("ctxprobe.agent", agent = %agent);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: experiment started against a target document.
pub fn emit_experiment_started(target: &str, agent_count: usize) {
    info!(event = "experiment.started", target = %target, agents = agent_count);
}

/// Emit event: one agent finished.
pub fn emit_agent_finished(agent: &str, success: bool, duration_ms: u64) {
    info!(
        event = "agent.finished",
        agent = %agent,
        success = success,
        duration_ms = duration_ms,
    );
}

/// Emit event: one invocation within an agent finished.
pub fn emit_invocation_finished(agent: &str, step: usize, success: bool, duration_ms: u64) {
    info!(
        event = "invocation.finished",
        agent = %agent,
        step = step,
        success = success,
        duration_ms = duration_ms,
    );
}

/// Emit event: experiment finished with aggregate counts.
pub fn emit_experiment_finished(passed: usize, failed: usize, changed: bool) {
    info!(
        event = "experiment.finished",
        passed = passed,
        failed = failed,
        changed = changed,
    );
}
