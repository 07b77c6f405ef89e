//! Subprocess execution of built command lines.
//!
//! Commands run through `sh -c` with a configurable PATH so the claude
//! binary resolves even when installed outside default search locations.
//! The invoker never reads or writes the target document itself; any edits
//! on disk are the external tool's own doing.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Instant;

use tracing::debug;

use crate::error::CtxprobeError;
use crate::settings::Settings;

/// Exit status POSIX shells report when the command word cannot be resolved.
const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// Longest command prefix echoed to the log.
const COMMAND_PREVIEW_CHARS: usize = 100;

/// Outcome of a single external tool invocation.
///
/// Produced once per call and never retried automatically.
#[derive(Debug)]
pub struct InvocationResult {
    /// Whether the process exited with status zero.
    pub success: bool,

    /// Captured stdout, possibly empty.
    pub stdout: String,

    /// Captured stderr. Content here does not imply failure; the tool
    /// prints warnings on stderr during successful runs.
    pub stderr: String,

    /// Classified failure, present exactly when `success` is false.
    pub error: Option<CtxprobeError>,

    /// Wall-clock duration of the call in milliseconds.
    pub duration_ms: u64,
}

impl InvocationResult {
    /// Whether the failure was the distinguished binary-not-found case.
    pub fn binary_not_found(&self) -> bool {
        matches!(self.error, Some(CtxprobeError::BinaryNotFound))
    }
}

/// Executes one built command as a child process.
///
/// One invocation attempt per call; failure normalization distinguishes an
/// unresolvable binary from a tool that ran and exited non-zero.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    search_path: String,
}

impl ProcessInvoker {
    pub fn new(search_path: impl Into<String>) -> Self {
        Self {
            search_path: search_path.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.search_path.clone())
    }

    /// Run the command, suspending until the process exits or fails to spawn.
    pub async fn invoke(&self, command: &str, workdir: &Path) -> InvocationResult {
        let start = Instant::now();
        debug!(command = %preview(command), workdir = %workdir.display(), "spawning claude");

        let spawned = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(workdir)
            .env("PATH", &self.search_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let child = match spawned {
            Ok(child) => child,
            Err(e) => return spawn_failure(e, start),
        };

        match child.wait_with_output().await {
            Ok(output) => classify(output, start),
            Err(e) => spawn_failure(e, start),
        }
    }

    /// Blocking form of [`ProcessInvoker::invoke`] for callers without an
    /// async context.
    pub fn invoke_blocking(&self, command: &str, workdir: &Path) -> InvocationResult {
        let start = Instant::now();
        debug!(command = %preview(command), workdir = %workdir.display(), "spawning claude (blocking)");

        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(workdir)
            .env("PATH", &self.search_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) => classify(output, start),
            Err(e) => spawn_failure(e, start),
        }
    }
}

fn classify(output: Output, start: Instant) -> InvocationResult {
    let duration_ms = start.elapsed().as_millis() as u64;
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "claude wrote to stderr on a successful exit");
        }
        return InvocationResult {
            success: true,
            stdout,
            stderr,
            error: None,
            duration_ms,
        };
    }

    let code = output.status.code().unwrap_or(-1);
    let error = if code == EXIT_COMMAND_NOT_FOUND {
        CtxprobeError::BinaryNotFound
    } else {
        let trimmed = stderr.trim();
        let detail = if trimmed.is_empty() {
            format!("exit code {code}")
        } else {
            format!("exit code {code}: {trimmed}")
        };
        CtxprobeError::ProcessFailure { detail }
    };

    InvocationResult {
        success: false,
        stdout,
        stderr,
        error: Some(error),
        duration_ms,
    }
}

fn spawn_failure(e: std::io::Error, start: Instant) -> InvocationResult {
    let error = if e.kind() == std::io::ErrorKind::NotFound {
        CtxprobeError::BinaryNotFound
    } else {
        CtxprobeError::ProcessFailure {
            detail: format!("failed to spawn shell: {e}"),
        }
    };
    InvocationResult {
        success: false,
        stdout: String::new(),
        stderr: String::new(),
        error: Some(error),
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

fn preview(command: &str) -> String {
    if command.chars().count() <= COMMAND_PREVIEW_CHARS {
        command.to_string()
    } else {
        let head: String = command.chars().take(COMMAND_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}
