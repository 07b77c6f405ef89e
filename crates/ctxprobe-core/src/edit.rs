//! One-shot edit façade for host integrations.
//!
//! The host hands over a prompt, a file path, and its settings; this module
//! builds a single stateless invocation, runs it, and reports a result the
//! host can surface directly as a notification.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::command::{CommandBuilder, Invocation};
use crate::error::CtxprobeError;
use crate::invoke::ProcessInvoker;
use crate::session::SessionFlag;
use crate::settings::Settings;

/// Fixed user-facing message for the unresolved-binary case.
pub const CLI_NOT_FOUND_MESSAGE: &str =
    "Claude Code CLI not found. Please ensure it is installed and in your PATH.";

/// Result surfaced to the embedding host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl EditOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Ask the tool to modify `file_path` according to `prompt`.
///
/// Runs in the file's parent directory so the tool resolves relative
/// references next to the document. Binary-not-found maps to
/// [`CLI_NOT_FOUND_MESSAGE`]; every other failure passes the underlying
/// error text through unmodified.
pub async fn edit_file(prompt: &str, file_path: &Path, settings: &Settings) -> EditOutcome {
    let builder = CommandBuilder::from_settings(settings);
    let invoker = ProcessInvoker::from_settings(settings);

    let workdir = file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let invocation = Invocation {
        prompt: prompt.to_string(),
        target: Some(file_path.to_path_buf()),
        flag: SessionFlag::None,
        workdir,
    };

    let command = match builder.build(&invocation) {
        Ok(command) => command,
        Err(e) => return EditOutcome::failed(e.to_string()),
    };

    let result = invoker.invoke(&command, &invocation.workdir).await;
    if result.success {
        info!(
            file = %file_path.display(),
            duration_ms = result.duration_ms,
            "edit request completed"
        );
        return EditOutcome::ok();
    }

    match result.error {
        Some(CtxprobeError::BinaryNotFound) => {
            warn!(file = %file_path.display(), "claude binary not found");
            EditOutcome::failed(CLI_NOT_FOUND_MESSAGE)
        }
        Some(other) => {
            warn!(file = %file_path.display(), error = %other, "edit request failed");
            EditOutcome::failed(other.to_string())
        }
        None => EditOutcome::failed("unknown error"),
    }
}
