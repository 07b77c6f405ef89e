//! Markdown context strategy: a rich context document carries the file
//! info, the embedded current content, and the required action.

use async_trait::async_trait;

use ctxprobe_core::{Result, SessionPlan, SessionStrategy};

use crate::runner::{Agent, AgentContext, ScratchFile};

pub struct MarkdownContext;

#[async_trait]
impl Agent for MarkdownContext {
    fn name(&self) -> &'static str {
        "markdown-context"
    }

    fn description(&self) -> &'static str {
        "writes a structured markdown context file embedding the current content"
    }

    fn strategy(&self) -> SessionStrategy {
        SessionStrategy::Stateless
    }

    async fn execute(&self, ctx: &AgentContext) -> Result<()> {
        let plan = SessionPlan::begin(self.strategy());
        let current = std::fs::read_to_string(&ctx.target)?;
        let doc_name = ctx.target_name();
        let path = ctx.target.display();

        let context = format!(
            "# Edit Task\n\n\
             ## File Information\n\
             - **Path**: {path}\n\
             - **Name**: {doc_name}\n\
             - **Task**: append one new section\n\n\
             ## Current Content\n\n\
             ```markdown\n{current}```\n\n\
             ## Required Action\n\n\
             Edit the file at `{path}` and add the following section at the end:\n\n\
             ```markdown\n\
             ## Markdown Context Delivered\n\n\
             A structured context document carried the file information, the embedded \
             current content, and these instructions.\n\
             ```\n\n\
             ## Verification\n\n\
             All existing content must be preserved; only the new section is added.\n"
        );

        // Removed when `scratch` drops, success or not.
        let scratch =
            ScratchFile::create(ctx.workdir().join(".ctxprobe-context.md"), &context)?;

        let prompt = format!(
            "Please read the context file at {} and follow the instructions to modify \
             {doc_name} as specified. The file to modify is at: {path}",
            scratch.path().display(),
            doc_name = doc_name,
            path = path
        );
        ctx.run_step(self.name(), 0, prompt, plan.flag_for_step(0))
            .await
    }
}
