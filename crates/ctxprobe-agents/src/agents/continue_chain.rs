//! Continue chain strategy: the first call starts a fresh conversation and
//! every later call rides `--continue`.

use async_trait::async_trait;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext};

pub struct ContinueChain;

#[async_trait]
impl Agent for ContinueChain {
    fn name(&self) -> &'static str {
        "continue-chain"
    }

    fn description(&self) -> &'static str {
        "starts fresh, then continues the tool's latest conversation on later calls"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::ContinueLatest
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());

        let first = format!(
            "Please add a new section to the document located at '{}'. Add it after the \
             existing content with the heading '## Fresh Conversation' and explain that this \
             starts a new conversation thread.",
            ctx.target.display()
        );
        ctx.run_step(self.name(), 0, first, plan.flag_for_step(0))
            .await?;
        ctx.pause().await;

        let second = "Excellent! Now please add another section right after the previous one \
                      with the heading '## Conversation Continued' and explain that the \
                      previous conversation was picked up again. Mention any context you \
                      remember from the earlier interaction."
            .to_string();
        ctx.run_step(self.name(), 1, second, plan.flag_for_step(1))
            .await?;
        ctx.pause().await;

        let third = "Perfect! Now add a final section '## Conversation Summary' that \
                     summarizes the whole thread. Reference what was added in both previous \
                     interactions to demonstrate conversation memory."
            .to_string();
        ctx.run_step(self.name(), 2, third, plan.flag_for_step(2))
            .await
    }
}
