//! Phase 1: Submission planning
//!
//! Determines what the submission will do. Only read-only git queries are
//! issued here, so a declined prompt or a protected branch leaves the
//! working copy exactly as it was.

use crate::error::{Error, Result};
use crate::progress::{Phase, ProgressCallback};
use crate::prompt::{Prompter, or_default};
use crate::repo::{self, Git, resolve_unique, validate_branch_name};
use crate::submit::SubmitOptions;
use crate::types::{BranchRef, ChangeSet, SubmissionMode, is_protected};
use tracing::{debug, info};

/// Everything execution needs, decided up front
#[derive(Debug, Clone)]
pub struct SubmissionPlan {
    /// How the commit lands on the remote
    pub mode: SubmissionMode,
    /// Target branch (does not exist yet in `NewBranch` mode)
    pub branch: BranchRef,
    /// Commit message
    pub commit_message: String,
    /// Changes under the output directory
    pub changes: ChangeSet,
}

/// Result of planning
#[derive(Debug, Clone)]
pub enum Planned {
    /// Ready to execute
    Ready(SubmissionPlan),
    /// Nothing changed under the output directory
    NoChanges,
    /// The user declined a confirmation
    Cancelled,
}

/// Create a submission plan
///
/// Asks, in order: confirm commit, mode, branch name (new branch only),
/// commit message.
pub async fn plan_submission(
    git: &Git<'_>,
    options: &SubmitOptions,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
) -> Result<Planned> {
    progress.on_phase(Phase::CheckingTree).await;

    let changes = repo::change_set(git, Some(&options.output_dir)).await?;
    if changes.is_empty() {
        debug!("No changes under {}", options.output_dir);
        return Ok(Planned::NoChanges);
    }

    progress.on_changes(&changes).await;
    if !prompter.confirm("Commit these changes?", true)? {
        return Ok(Planned::Cancelled);
    }

    let mode = prompter.choose_mode()?;
    let branch = match mode {
        SubmissionMode::NewBranch => {
            match choose_new_branch(git, options, prompter, progress).await? {
                Some(branch) => branch,
                None => return Ok(Planned::Cancelled),
            }
        }
        SubmissionMode::ExistingBranch => {
            let current = repo::current_branch(git).await?;
            if current.is_protected() {
                return Err(Error::ProtectedBranch(current.name));
            }
            progress
                .on_message(&format!("Committing to current branch '{}'", current.name))
                .await;
            current
        }
    };

    let input = prompter.request_commit_message(&options.default_commit_message)?;
    let commit_message = or_default(&input, &options.default_commit_message);

    info!("Planned {mode} submission on {}", branch.name);

    Ok(Planned::Ready(SubmissionPlan {
        mode,
        branch,
        commit_message,
        changes,
    }))
}

/// Pick the name for a new branch; `None` if the user backs out
async fn choose_new_branch(
    git: &Git<'_>,
    options: &SubmitOptions,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
) -> Result<Option<BranchRef>> {
    let input = prompter.request_branch_name(&options.default_branch_name)?;
    let typed = input.trim();
    let auto = typed.is_empty();
    let desired = if auto {
        options.default_branch_name.as_str()
    } else {
        typed
    };

    validate_branch_name(desired)?;
    if is_protected(desired) {
        return Err(Error::ProtectedBranch(desired.to_string()));
    }

    progress.on_phase(Phase::ResolvingBranch).await;

    if auto {
        let branch = resolve_unique(git, desired, options.max_name_attempts).await?;
        progress
            .on_message(&format!("Using branch name '{}'", branch.name))
            .await;
        return Ok(Some(branch));
    }

    if !repo::branch_exists(git, desired).await? {
        return Ok(Some(BranchRef {
            name: desired.to_string(),
            exists: false,
        }));
    }

    progress
        .on_warning(&format!("Branch '{desired}' already exists"))
        .await;
    if !prompter.confirm("Create a new branch with a numbered suffix instead?", true)? {
        return Ok(None);
    }

    let branch = resolve_unique(git, desired, options.max_name_attempts).await?;
    progress
        .on_message(&format!("Using branch name '{}' (requested '{desired}')", branch.name))
        .await;
    Ok(Some(branch))
}
