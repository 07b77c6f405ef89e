//! Explicit session strategy: one caller-generated identifier threads the
//! whole conversation through `--session-id`.

use async_trait::async_trait;
use tracing::info;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext};

pub struct ExplicitSession;

#[async_trait]
impl Agent for ExplicitSession {
    fn name(&self) -> &'static str {
        "explicit-session"
    }

    fn description(&self) -> &'static str {
        "threads one generated session id through three consecutive edits"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::PersistentId
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());
        let token = plan.token().unwrap_or_default().to_string();
        info!(session = %token, "opening explicit session");

        let first = format!(
            "Please add a new section to the document located at '{}'. Add it after the \
             existing content with the heading '## Session Opened' and write about starting \
             a persistent session with ID: {token}",
            ctx.target.display()
        );
        ctx.run_step(self.name(), 0, first, plan.flag_for_step(0))
            .await?;
        ctx.pause().await;

        let second = "Great! Now please add another section right after the previous one with \
                      the heading '## Session Continued' and explain that this is the same \
                      session continuing the conversation across separate invocations."
            .to_string();
        ctx.run_step(self.name(), 1, second, plan.flag_for_step(1))
            .await?;
        ctx.pause().await;

        let third = "Perfect! Now add a final section '## Session Summary' that summarizes \
                     what was added in this session. Reference the two previous sections to \
                     confirm you remember the earlier interactions."
            .to_string();
        ctx.run_step(self.name(), 2, third, plan.flag_for_step(2))
            .await
    }
}
