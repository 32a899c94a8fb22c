//! Submit command - commit fetched metadata and push it for review

use crate::cli::progress::CliProgress;
use crate::cli::prompt::{DialoguerPrompter, Presets};
use crate::cli::render::{announce_pull_request, print_result};
use crate::cli::Context;
use ctmd_tool::types::{SubmissionMode, WorkflowResult};
use ctmd_tool::workflow::{Intent, Workflow};

/// Answers given on the command line
#[derive(Debug, Clone, Default)]
pub struct SubmitFlags {
    /// `--new-branch [NAME]`; `Some("")` when given without a name
    pub new_branch: Option<String>,
    /// `--existing`
    pub existing: bool,
    /// `-m MESSAGE`
    pub message: Option<String>,
    /// `-y`
    pub yes: bool,
    /// `--open`
    pub open: bool,
}

impl SubmitFlags {
    fn presets(&self) -> Presets {
        let mode = if self.existing {
            Some(SubmissionMode::ExistingBranch)
        } else if self.new_branch.is_some() {
            Some(SubmissionMode::NewBranch)
        } else {
            None
        };
        Presets {
            assume_yes: self.yes,
            mode,
            branch_name: self.new_branch.clone(),
            commit_message: self.message.clone(),
        }
    }
}

/// Run the submit command
pub async fn run_submit(
    ctx: &Context,
    flags: &SubmitFlags,
    progress: &CliProgress,
) -> WorkflowResult {
    let prompter = DialoguerPrompter::with_presets(flags.presets());
    let workflow = Workflow::new(&ctx.runner, &prompter, progress, &ctx.settings);
    let result = workflow.run(Intent::Submit).await;

    print_result(&result);
    if let WorkflowResult::Committed {
        branch,
        compare_url,
        ..
    } = &result
    {
        announce_pull_request(&ctx.runner, &ctx.settings, branch, compare_url, flags.open).await;
    }
    result
}
