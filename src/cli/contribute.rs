//! Contribute command - optional sync, fetch, then submit

use crate::cli::fetch::run_fetch;
use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use crate::cli::{Context, SubmitFlags, run_submit, run_sync};
use anstream::println;
use ctmd_tool::error::Result;
use ctmd_tool::tmdb::{FetchOutcome, MediaKind};
use ctmd_tool::types::WorkflowResult;

/// Run the whole contribution in one go
///
/// Stops after the first step that does not end cleanly.
pub async fn run_contribute(
    ctx: &Context,
    kind: MediaKind,
    id: &str,
    sync_first: bool,
    flags: &SubmitFlags,
) -> Result<WorkflowResult> {
    let progress = CliProgress::compact();

    if sync_first {
        println!("{}", "Step 1/3: sync".emphasis());
        let synced = run_sync(ctx, &progress).await;
        if !matches!(synced, WorkflowResult::Synced { .. }) {
            return Ok(synced);
        }
        println!();
    }

    println!("{}", step_label(sync_first, 2, "fetch").emphasis());
    if let FetchOutcome::AlreadyExists { .. } = run_fetch(ctx, kind, id).await? {
        return Ok(WorkflowResult::Cancelled);
    }
    println!();

    println!("{}", step_label(sync_first, 3, "submit").emphasis());
    Ok(run_submit(ctx, flags, &progress).await)
}

fn step_label(sync_first: bool, step: usize, name: &str) -> String {
    if sync_first {
        format!("Step {step}/3: {name}")
    } else {
        format!("Step {}/2: {name}", step - 1)
    }
}
