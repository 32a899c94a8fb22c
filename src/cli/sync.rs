//! Sync command - pull the canonical upstream into the local clone

use crate::cli::progress::CliProgress;
use crate::cli::prompt::DialoguerPrompter;
use crate::cli::render::print_result;
use crate::cli::style::Stylize;
use crate::cli::Context;
use anstream::println;
use ctmd_tool::types::WorkflowResult;
use ctmd_tool::workflow::{Intent, Workflow};

/// Run the sync command
pub async fn run_sync(ctx: &Context, progress: &CliProgress) -> WorkflowResult {
    println!(
        "Syncing with {} ({})",
        ctx.settings.upstream.name.accent(),
        ctx.settings.upstream.url.muted()
    );

    let prompter = DialoguerPrompter::interactive();
    let workflow = Workflow::new(&ctx.runner, &prompter, progress, &ctx.settings);
    let result = workflow.run(Intent::Sync).await;

    print_result(&result);
    result
}
