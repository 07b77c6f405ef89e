//! Escaped command-line construction for the external tool.
//!
//! Commands take the shape
//! `echo "<escaped prompt>" | <claude> --model <tier> --permission-mode acceptEdits [session flags]`
//! with the prompt piped to the binary's stdin. The prompt is the only
//! untrusted input; everything else is fixed tokens.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CtxprobeError, Result};
use crate::session::SessionFlag;
use crate::settings::Settings;

/// Model tiers the external tool accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    Opus,
    #[default]
    Sonnet,
    Haiku,
}

impl Model {
    /// Name passed to `--model`.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Model::Opus => "opus",
            Model::Sonnet => "sonnet",
            Model::Haiku => "haiku",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opus" => Ok(Model::Opus),
            "sonnet" => Ok(Model::Sonnet),
            "haiku" => Ok(Model::Haiku),
            other => Err(format!(
                "unknown model '{other}'; expected opus, sonnet, or haiku"
            )),
        }
    }
}

/// A fully-specified request for one external tool call.
///
/// Built once, consumed once; never mutated after construction.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Free-form instruction text.
    pub prompt: String,

    /// When set, appended to the prompt as an explicit instruction clause.
    /// The tool parses the path out of natural language; it is never a
    /// separate process argument.
    pub target: Option<PathBuf>,

    /// Session continuity flag for this call.
    pub flag: SessionFlag,

    /// Directory the command runs in. Continuation flags key off the
    /// working directory, so multi-step runners must keep it stable.
    pub workdir: PathBuf,
}

/// Constructs safely-escaped external-process invocations.
///
/// Pure: building a command has no side effects and depends only on the
/// builder's configuration and the invocation.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    claude_path: String,
    model: Model,
}

impl CommandBuilder {
    pub fn new(claude_path: impl Into<String>, model: Model) -> Self {
        Self {
            claude_path: claude_path.into(),
            model,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.claude_path.clone(), settings.model)
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Render the invocation as a single-line shell pipeline.
    ///
    /// Fails with [`CtxprobeError::EmptyPrompt`] when the prompt is empty
    /// after trimming.
    pub fn build(&self, invocation: &Invocation) -> Result<String> {
        let trimmed = invocation.prompt.trim();
        if trimmed.is_empty() {
            return Err(CtxprobeError::EmptyPrompt);
        }

        let mut prompt = trimmed.to_string();
        if let Some(target) = &invocation.target {
            prompt.push_str(&format!(
                ". Please modify the file at: {}",
                target.display()
            ));
        }

        let mut command = format!(
            "echo \"{}\" | {} --model {} --permission-mode acceptEdits",
            escape_for_double_quotes(&prompt),
            self.claude_path,
            self.model.cli_name()
        );
        for arg in invocation.flag.cli_args() {
            command.push(' ');
            command.push_str(&arg);
        }
        Ok(command)
    }
}

/// Escape text for inclusion inside a double-quoted shell argument.
///
/// Backslashes are escaped first so the later escapes are not doubled.
/// Newlines collapse to the literal two-character sequence `\n` (and bare
/// carriage returns are dropped), keeping the whole pipeline on one line.
pub fn escape_for_double_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '`' => out.push_str("\\`"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}
