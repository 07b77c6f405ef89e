//! Sequential experiment orchestration over the shared document.
//!
//! Agents run strictly one after another; runner N+1 starts only once
//! runner N's outcome is recorded. Exclusive access to the document is by
//! construction (this sequencing), not enforced by locking; it becomes an
//! assumption, not a guarantee, if the tool's own writes outlive its process.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use ctxprobe_core::obs::{emit_agent_finished, emit_experiment_finished, emit_experiment_started};
use ctxprobe_core::{AgentSpan, CtxprobeError, DocSnapshot, Result, Settings};

use crate::report::ExperimentReport;
use crate::runner::{Agent, AgentContext, AgentOutcome};

/// Timing knobs for one experiment run.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Pause between consecutive agents.
    pub agent_delay: Duration,

    /// Pause between consecutive invocations inside one agent.
    pub step_delay: Duration,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            agent_delay: Duration::from_secs(2),
            step_delay: Duration::from_secs(2),
        }
    }
}

/// Runs a declared list of agents against one target document.
pub struct Experiment;

impl Experiment {
    /// Run every agent in declared order against `target`.
    ///
    /// Fails fast with [`CtxprobeError::MissingTarget`] before any agent
    /// runs if the document is absent. Individual agent failures are
    /// recorded in the report and never halt the sequence.
    pub async fn run(
        settings: &Settings,
        target: &Path,
        agents: Vec<Box<dyn Agent>>,
        config: &ExperimentConfig,
    ) -> Result<ExperimentReport> {
        if !target.is_file() {
            return Err(CtxprobeError::MissingTarget(target.to_path_buf()));
        }

        let started_at = Utc::now();
        let before = DocSnapshot::capture(target)?;
        let backup = backup_path_for(target);
        std::fs::write(&backup, before.bytes())?;
        info!(backup = %backup.display(), bytes = before.len(), "wrote document backup");

        let ctx =
            AgentContext::new(settings, target.to_path_buf()).with_step_delay(config.step_delay);

        let total = agents.len();
        emit_experiment_started(&target.display().to_string(), total);

        let mut outcomes = Vec::with_capacity(total);
        for (index, agent) in agents.iter().enumerate() {
            let span = AgentSpan::enter(agent.name());
            info!(strategy = ?agent.strategy(), "running agent");

            let start = Instant::now();
            let result = agent.execute(&ctx).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let outcome = match result {
                Ok(()) => AgentOutcome {
                    agent: agent.name().to_string(),
                    success: true,
                    error: None,
                    duration_ms,
                },
                Err(e) => {
                    warn!(error = %e, "agent failed");
                    AgentOutcome {
                        agent: agent.name().to_string(),
                        success: false,
                        error: Some(e.to_string()),
                        duration_ms,
                    }
                }
            };
            emit_agent_finished(agent.name(), outcome.success, duration_ms);
            drop(span);
            outcomes.push(outcome);

            if index + 1 < total && !config.agent_delay.is_zero() {
                debug!(
                    delay_ms = config.agent_delay.as_millis() as u64,
                    "waiting before next agent"
                );
                tokio::time::sleep(config.agent_delay).await;
            }
        }

        let after = DocSnapshot::capture(target)?;
        let report = ExperimentReport::new(target, &backup, started_at, outcomes, &before, &after);
        emit_experiment_finished(report.passed, report.failed, report.changed);
        Ok(report)
    }
}

/// Sibling backup path: `Test Doc.md` becomes `Test Doc.backup.md`.
pub fn backup_path_for(target: &Path) -> PathBuf {
    match (target.file_stem(), target.extension()) {
        (Some(stem), Some(ext)) => target.with_file_name(format!(
            "{}.backup.{}",
            stem.to_string_lossy(),
            ext.to_string_lossy()
        )),
        _ => {
            let mut name = target.as_os_str().to_owned();
            name.push(".backup");
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_sits_next_to_the_target() {
        assert_eq!(
            backup_path_for(Path::new("/docs/Test Doc.md")),
            PathBuf::from("/docs/Test Doc.backup.md")
        );
        assert_eq!(
            backup_path_for(Path::new("notes.txt")),
            PathBuf::from("notes.backup.txt")
        );
    }

    #[test]
    fn backup_path_handles_extensionless_targets() {
        assert_eq!(
            backup_path_for(Path::new("/docs/NOTES")),
            PathBuf::from("/docs/NOTES.backup")
        );
    }

    #[tokio::test]
    async fn missing_target_aborts_before_any_agent() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.md");

        let err = Experiment::run(
            &Settings::default(),
            &absent,
            crate::agents::default_agents(),
            &ExperimentConfig::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CtxprobeError::MissingTarget(_)));
        assert!(!backup_path_for(&absent).exists());
    }
}
