//! Instruction file strategy: the task lives in a hidden file next to the
//! target, and the prompt only points the tool at it.

use async_trait::async_trait;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext, ScratchFile};

pub struct InstructionFile;

#[async_trait]
impl Agent for InstructionFile {
    fn name(&self) -> &'static str {
        "instruction-file"
    }

    fn description(&self) -> &'static str {
        "writes a transient instruction file in the working directory and points the tool at it"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::Stateless
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());
        let doc_name = ctx.target_name();

        let instructions = format!(
            "# Task\n\nPlease modify the file '{doc_name}' in the current directory by adding \
             a new section:\n\n## Instruction File Followed\n\nWrite about how the task \
             reached you through an instruction file in the working directory. The file is \
             located at: {path}\n\nAfter adding this section, save the file.\n",
            doc_name = doc_name,
            path = ctx.target.display()
        );

        // Removed when `scratch` drops, success or not.
        let scratch = ScratchFile::create(
            ctx.workdir().join(".ctxprobe-instructions.md"),
            &instructions,
        )?;

        let prompt = format!(
            "Please read the file '{}' in the current directory and follow its instructions \
             to modify {doc_name}",
            scratch.name(),
            doc_name = doc_name
        );
        ctx.run_step(self.name(), 0, prompt, plan.flag_for_step(0))
            .await
    }
}
