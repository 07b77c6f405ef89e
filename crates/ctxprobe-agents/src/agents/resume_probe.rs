//! Resume probe strategy: an exploratory look at what the tool considers
//! resumable, followed by a fresh trackable conversation and a continue.

use async_trait::async_trait;
use tracing::info;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext};

pub struct ResumeProbe;

#[async_trait]
impl Agent for ResumeProbe {
    fn name(&self) -> &'static str {
        "resume-probe"
    }

    fn description(&self) -> &'static str {
        "probes --resume for resumable state, then falls back to a fresh continue chain"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::ResumeProbe
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());

        // The probe is informational either way: without an interactive
        // session picker the tool may refuse the bare resume flag, and that
        // observation is the point of the step.
        let probe = "Reply with a short note describing which conversation, if any, you \
                     resumed."
            .to_string();
        match ctx
            .run_step(self.name(), 0, probe, plan.flag_for_step(0))
            .await
        {
            Ok(()) => info!("resume probe accepted"),
            Err(e) => info!(error = %e, "resume probe refused"),
        }
        ctx.pause().await;

        let start = format!(
            "Please add a section '## Resume Trail Start' to the document at '{}'. This is \
             the beginning of a conversation we want to pick up again later.",
            ctx.target.display()
        );
        ctx.run_step(self.name(), 1, start, plan.flag_for_step(1))
            .await?;
        ctx.pause().await;

        let follow = "Now please add '## Resume Trail Continued' and mention any session \
                      context you still have from the previous interaction."
            .to_string();
        ctx.run_step(self.name(), 2, follow, plan.flag_for_step(2))
            .await
    }
}
