//! Piped content strategy: the document body travels inline with the prompt.

use async_trait::async_trait;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext};

pub struct PipeContent;

#[async_trait]
impl Agent for PipeContent {
    fn name(&self) -> &'static str {
        "pipe-content"
    }

    fn description(&self) -> &'static str {
        "embeds the full current document content in the prompt"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::Stateless
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());
        let current = std::fs::read_to_string(&ctx.target)?;
        let prompt = format!(
            "Here is the current content of {name}:\n\n```markdown\n{current}\n```\n\n\
             Please modify this file by adding a new section with the heading \
             '## Piped Content Received' and write about how the full document content \
             arrived inline with the prompt. Write the updated content back to {name} at \
             path: {path}",
            name = ctx.target_name(),
            current = current,
            path = ctx.target.display()
        );
        ctx.run_step(self.name(), 0, prompt, plan.flag_for_step(0))
            .await
    }
}
