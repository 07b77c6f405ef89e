//! Script context strategy: a transient helper script sits next to the
//! target while one composite, numbered-steps prompt does the work.

use async_trait::async_trait;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext, ScratchFile};

pub struct ScriptContext;

#[async_trait]
impl Agent for ScriptContext {
    fn name(&self) -> &'static str {
        "script-context"
    }

    fn description(&self) -> &'static str {
        "stages a helper script alongside the target and sends one composite multi-step prompt"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::Stateless
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());
        let path = ctx.target.display();

        let script = format!(
            "# Inspect the current content\ncat \"{path}\"\n\n\
             # Sketch of the section the edit should add\necho \"\"\n\
             echo \"## Script Context Success\"\n\
             echo \"Sequential commands staged the context for this edit.\"\n"
        );

        // Staged for the duration of the call; removed on drop.
        let _scratch = ScratchFile::create(ctx.workdir().join(".ctxprobe-steps.sh"), &script)?;

        let prompt = format!(
            "I need you to: 1. Read the file at {path} 2. Add a new section titled \
             '## Script Context Success' 3. Write about how a multi-step command sequence \
             staged the context for this edit 4. Save the changes back to the file. The file \
             currently exists at: {path}. Please use your file editing capabilities to add \
             this new section."
        );
        ctx.run_step(self.name(), 0, prompt, plan.flag_for_step(0))
            .await
    }
}
