//! Workflow controller
//!
//! Runs pre-flight checks, dispatches to the sync or submission engine, and
//! folds every outcome (including errors) into one [`WorkflowResult`].

use crate::error::Error;
use crate::progress::ProgressCallback;
use crate::prompt::Prompter;
use crate::repo::{Git, GitRunner, RepoLocation, RepositoryHandle};
use crate::submit::{Planned, SubmitOptions, execute_submission, plan_submission};
use crate::sync::{SyncOutcome, sync_with_upstream};
use crate::types::{RemoteRef, Stage, WorkflowResult};
use tracing::{error, info};

/// What the user asked the workflow to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Pull the canonical upstream into the local clone
    Sync,
    /// Commit and push fetched metadata
    Submit,
}

/// Explicit configuration for a workflow run
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    /// How to find the working copy
    pub location: RepoLocation,
    /// Remote that sync pulls from (created if missing)
    pub upstream: RemoteRef,
    /// Submission knobs
    pub submit: SubmitOptions,
}

/// Top-level sequencing over the engines
pub struct Workflow<'a> {
    runner: &'a dyn GitRunner,
    prompter: &'a dyn Prompter,
    progress: &'a dyn ProgressCallback,
    settings: &'a WorkflowSettings,
}

impl<'a> Workflow<'a> {
    /// Assemble a controller from its collaborators
    pub const fn new(
        runner: &'a dyn GitRunner,
        prompter: &'a dyn Prompter,
        progress: &'a dyn ProgressCallback,
        settings: &'a WorkflowSettings,
    ) -> Self {
        Self {
            runner,
            prompter,
            progress,
            settings,
        }
    }

    /// Check git is installed, then locate the repository
    pub async fn preflight(&self) -> crate::error::Result<RepositoryHandle> {
        self.runner.check_available().await?;
        RepositoryHandle::discover(&self.settings.location)
    }

    /// Run one intent end to end
    pub async fn run(&self, intent: Intent) -> WorkflowResult {
        let repo = match self.preflight().await {
            Ok(repo) => repo,
            Err(e) => return report(e),
        };

        match intent {
            Intent::Sync => self.sync(&repo).await,
            Intent::Submit => self.submit(&repo).await,
        }
    }

    /// Sync an already-located repository
    pub async fn sync(&self, repo: &RepositoryHandle) -> WorkflowResult {
        let git = Git::new(self.runner, repo);
        match sync_with_upstream(&git, &self.settings.upstream, self.prompter, self.progress).await
        {
            Ok(SyncOutcome::Synced {
                branch,
                upstream_branch,
                head,
            }) => {
                info!("Synced {branch} with {}/{upstream_branch}", self.settings.upstream.name);
                WorkflowResult::Synced {
                    branch,
                    upstream_branch,
                    head,
                }
            }
            Ok(SyncOutcome::Cancelled) => WorkflowResult::Cancelled,
            Err(e) => report(e),
        }
    }

    /// Submit from an already-located repository
    pub async fn submit(&self, repo: &RepositoryHandle) -> WorkflowResult {
        let git = Git::new(self.runner, repo);
        let options = &self.settings.submit;

        let plan = match plan_submission(&git, options, self.prompter, self.progress).await {
            Ok(Planned::Ready(plan)) => plan,
            Ok(Planned::NoChanges) => return WorkflowResult::NoOpClean,
            Ok(Planned::Cancelled) => return WorkflowResult::Cancelled,
            Err(e) => return report(e),
        };

        match execute_submission(&git, &plan, options, self.progress).await {
            Ok(result) => WorkflowResult::Committed {
                branch: result.branch,
                commit_message: result.commit_message,
                compare_url: result.compare_url,
                mode: result.mode,
            },
            Err(e) => report(e),
        }
    }
}

/// Stage an error is attributed to when it carries none itself
fn stage_of(err: &Error) -> Stage {
    match err {
        Error::GitCommandFailed { stage, .. } => *stage,
        Error::Timeout { .. } => Stage::Timeout,
        Error::NameResolutionExhausted { .. } | Error::InvalidBranchName(_) => Stage::BranchName,
        Error::DetachedHead => Stage::Status,
        Error::Prompt(_) => Stage::Prompt,
        _ => Stage::Preflight,
    }
}

/// Fold an engine error into the run's terminal result
fn report(err: Error) -> WorkflowResult {
    if let Error::ProtectedBranch(branch) = err {
        return WorkflowResult::ProtectedBranch { branch };
    }
    let stage = stage_of(&err);
    error!("Workflow failed at {stage}: {err}");
    WorkflowResult::Failed {
        stage,
        cause: err.to_string(),
    }
}
