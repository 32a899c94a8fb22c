//! Phase 2: Submission execution
//!
//! Executes the submission plan: branch, stage, commit, push. Every step
//! either succeeds or ends the run; nothing is retried or rolled back, so a
//! rejected push leaves the new commit in place locally.

use crate::error::Result;
use crate::progress::{Phase, ProgressCallback};
use crate::repo::Git;
use crate::submit::{SubmissionPlan, SubmitOptions};
use crate::types::{Stage, SubmissionMode};
use tracing::info;

/// Result of submission execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Branch that was pushed
    pub branch: String,
    /// Commit message used
    pub commit_message: String,
    /// URL for opening a pull request
    pub compare_url: String,
    /// Mode the submission ran in
    pub mode: SubmissionMode,
}

/// Execute a submission plan
///
/// This performs the actual operations:
/// 1. Create and check out the branch (new branch mode)
/// 2. Stage the output directory only
/// 3. Commit
/// 4. Push (`-u <remote> <branch>` for a new branch, plain otherwise)
pub async fn execute_submission(
    git: &Git<'_>,
    plan: &SubmissionPlan,
    options: &SubmitOptions,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionResult> {
    let branch = plan.branch.name.as_str();

    if plan.mode == SubmissionMode::NewBranch {
        progress.on_phase(Phase::CreatingBranch).await;
        git.run_checked(Stage::Checkout, &["checkout", "-b", branch])
            .await?;
    }

    progress.on_phase(Phase::Staging).await;
    git.run_checked(Stage::Add, &["add", &options.output_dir])
        .await?;

    progress.on_phase(Phase::Committing).await;
    git.run_checked(Stage::Commit, &["commit", "-m", &plan.commit_message])
        .await?;

    progress.on_phase(Phase::Pushing).await;
    match plan.mode {
        SubmissionMode::NewBranch => {
            git.run_checked(Stage::Push, &["push", "-u", &options.push_remote, branch])
                .await?;
        }
        SubmissionMode::ExistingBranch => {
            git.run_checked(Stage::Push, &["push"]).await?;
        }
    }

    let compare_url = options.project.compare_url(&options.compare_base, branch);
    info!("Pushed {branch}; compare at {compare_url}");
    progress.on_phase(Phase::Complete).await;

    Ok(SubmissionResult {
        branch: branch.to_string(),
        commit_message: plan.commit_message.clone(),
        compare_url,
        mode: plan.mode,
    })
}
