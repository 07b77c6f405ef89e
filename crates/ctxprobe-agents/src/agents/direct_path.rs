//! Direct path strategy: the prompt itself carries the absolute file path.

use async_trait::async_trait;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext};

pub struct DirectPath;

#[async_trait]
impl Agent for DirectPath {
    fn name(&self) -> &'static str {
        "direct-path"
    }

    fn description(&self) -> &'static str {
        "references the target by absolute path inside the prompt"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::Stateless
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());
        let prompt = format!(
            "Please add a new section to the document located at '{}'. Add it after the \
             existing content with the heading '## Direct Path Says Hello' and write a short \
             friendly note about receiving the document through a direct path reference.",
            ctx.target.display()
        );
        ctx.run_step(self.name(), 0, prompt, plan.flag_for_step(0))
            .await
    }
}
