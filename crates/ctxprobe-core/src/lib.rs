//! ctxprobe core library
//!
//! Building blocks for driving the Claude Code CLI as a subprocess:
//! - escaped command-line construction ([`command`])
//! - shell execution with an augmented PATH ([`invoke`])
//! - the session continuity model ([`session`])
//! - whole-document snapshots for before/after comparison ([`snapshot`])
//! - the one-shot edit façade for host integrations ([`edit`])

pub mod command;
pub mod edit;
pub mod error;
pub mod invoke;
pub mod obs;
pub mod session;
pub mod settings;
pub mod snapshot;

pub use command::{CommandBuilder, Invocation, Model};
pub use edit::{edit_file, EditOutcome, CLI_NOT_FOUND_MESSAGE};
pub use error::{CtxprobeError, Result};
pub use invoke::{InvocationResult, ProcessInvoker};
pub use obs::{init_tracing, AgentSpan};
pub use session::{SessionFlag, SessionPlan, SessionStrategy};
pub use settings::Settings;
pub use snapshot::DocSnapshot;

/// ctxprobe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
