//! ctxprobe agents
//!
//! Named strategies for handing a document to the Claude Code CLI, plus the
//! orchestrator that runs them sequentially against one target and reports
//! whether the document actually changed:
//! - [`runner`]: the [`Agent`] trait and shared step sequencing
//! - [`agents`]: the registered strategy implementations
//! - [`experiment`]: sequential orchestration with backup and diffing
//! - [`report`]: the aggregated run report

pub mod agents;
pub mod experiment;
pub mod report;
pub mod runner;

pub use agents::{agents_by_name, default_agents};
pub use experiment::{backup_path_for, Experiment, ExperimentConfig};
pub use report::ExperimentReport;
pub use runner::{Agent, AgentContext, AgentOutcome, ScratchFile};
