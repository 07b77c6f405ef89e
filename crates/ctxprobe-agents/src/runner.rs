//! Agent trait and shared invocation sequencing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ctxprobe_core::obs::emit_invocation_finished;
use ctxprobe_core::{
    CommandBuilder, Invocation, ProcessInvoker, Result, SessionFlag, SessionStrategy, Settings,
};

/// Shared dependencies handed to every agent.
#[derive(Debug, Clone)]
pub struct AgentContext {
    pub builder: CommandBuilder,
    pub invoker: ProcessInvoker,

    /// Absolute path of the shared target document.
    pub target: PathBuf,

    /// Pause between consecutive invocations of one agent. A weak
    /// substitute for completion detection: the tool gives no durability
    /// guarantee for its file edits, so we wait a fixed interval before the
    /// next prompt references them.
    pub step_delay: Duration,
}

impl AgentContext {
    pub fn new(settings: &Settings, target: PathBuf) -> Self {
        Self {
            builder: CommandBuilder::from_settings(settings),
            invoker: ProcessInvoker::from_settings(settings),
            target,
            step_delay: Duration::from_secs(2),
        }
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Directory containing the target document. All invocations run here
    /// so `--continue` keys off a stable working directory.
    pub fn workdir(&self) -> PathBuf {
        self.target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// File name of the target document, for prompts that refer to it
    /// relative to the working directory.
    pub fn target_name(&self) -> String {
        self.target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.target.display().to_string())
    }

    /// Build and execute one invocation, failing on the first error.
    ///
    /// The next step of a sequence is only reachable after this call
    /// returns, so invocation N+1 never overlaps invocation N.
    pub async fn run_step(
        &self,
        agent: &str,
        step: usize,
        prompt: String,
        flag: SessionFlag,
    ) -> Result<()> {
        let invocation = Invocation {
            prompt,
            target: None,
            flag,
            workdir: self.workdir(),
        };
        let command = self.builder.build(&invocation)?;
        let result = self.invoker.invoke(&command, &invocation.workdir).await;
        emit_invocation_finished(agent, step, result.success, result.duration_ms);
        match result.error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Fixed pause between sequential steps.
    pub async fn pause(&self) {
        if !self.step_delay.is_zero() {
            debug!(delay_ms = self.step_delay.as_millis() as u64, "waiting before next step");
            tokio::time::sleep(self.step_delay).await;
        }
    }
}

/// One named end-to-end strategy for editing the shared document.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable identifier used in reports and CLI selection.
    fn name(&self) -> &'static str;

    /// One-line description of the strategy.
    fn description(&self) -> &'static str;

    /// Session policy this agent applies across its invocations.
    fn strategy(&self) -> SessionStrategy;

    /// Perform the edit sequence.
    ///
    /// Implementations stop at the first failing invocation and rely on
    /// [`ScratchFile`] for side-channel artifact cleanup on every exit
    /// path.
    async fn execute(&self, ctx: &AgentContext) -> Result<()>;
}

/// Result of one agent execution. Aggregated by the orchestrator, never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub agent: String,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Transient side-channel file released on drop.
///
/// Deletion errors are logged and swallowed: a leftover scratch file never
/// affects document correctness, while a missed cleanup on a failure path
/// would.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Write `contents` at `path`, replacing any previous file.
    pub fn create(path: PathBuf, contents: &str) -> Result<Self> {
        std::fs::write(&path, contents)?;
        debug!(path = %path.display(), "wrote scratch file");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name, for prompts that refer to the artifact relative to the
    /// working directory.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove scratch file");
        } else {
            debug!(path = %self.path.display(), "removed scratch file");
        }
    }
}
