//! The registered strategy runners.
//!
//! Each runner appends a uniquely-headed section to the target document so
//! a human can tell at a glance which strategies got through. Declared
//! order matters: the orchestrator runs the list as given.

mod continue_chain;
mod direct_path;
mod explicit_session;
mod instruction_file;
mod markdown_context;
mod pipe_content;
mod resume_probe;
mod script_context;

pub use continue_chain::ContinueChain;
pub use direct_path::DirectPath;
pub use explicit_session::ExplicitSession;
pub use instruction_file::InstructionFile;
pub use markdown_context::MarkdownContext;
pub use pipe_content::PipeContent;
pub use resume_probe::ResumeProbe;
pub use script_context::ScriptContext;

use crate::runner::Agent;

/// All registered agents in their declared execution order: the five
/// context-passing strategies first, then the three session-continuity
/// ones.
pub fn default_agents() -> Vec<Box<dyn Agent>> {
    vec![
        Box::new(DirectPath),
        Box::new(PipeContent),
        Box::new(InstructionFile),
        Box::new(ScriptContext),
        Box::new(MarkdownContext),
        Box::new(ExplicitSession),
        Box::new(ContinueChain),
        Box::new(ResumeProbe),
    ]
}

/// Select agents by name, preserving the requested order.
pub fn agents_by_name(names: &[String]) -> anyhow::Result<Vec<Box<dyn Agent>>> {
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let agent = default_agents()
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| anyhow::anyhow!("unknown agent: {name}"))?;
        selected.push(agent);
    }
    Ok(selected)
}
