//! Sync engine
//!
//! Brings the local clone up to date with the canonical upstream:
//! 1. Guard - confirm before pulling over uncommitted changes
//! 2. Branch - offer to move onto the trunk branch
//! 3. Pull - ensure upstream, fetch, pull `main` (falling back to `master`)

use crate::error::{Error, Result};
use crate::progress::{Phase, ProgressCallback};
use crate::prompt::Prompter;
use crate::repo::{self, Git, UpstreamStatus, ensure_upstream};
use crate::types::{PROTECTED_BRANCHES, RemoteRef, Stage};
use tracing::{info, warn};

/// Result of a sync run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Upstream was merged into the local branch
    Synced {
        /// Branch that received the pull
        branch: String,
        /// Upstream branch that was pulled
        upstream_branch: String,
        /// `git log -1 --oneline` after the pull
        head: Option<String>,
    },
    /// The user declined to continue over uncommitted changes
    Cancelled,
}

/// Pull the upstream trunk into the local working copy
pub async fn sync_with_upstream(
    git: &Git<'_>,
    upstream: &RemoteRef,
    prompter: &dyn Prompter,
    progress: &dyn ProgressCallback,
) -> Result<SyncOutcome> {
    progress.on_phase(Phase::CheckingTree).await;

    let changes = repo::change_set(git, None).await?;
    if !changes.is_empty() {
        progress.on_changes(&changes).await;
        let proceed = prompter.confirm(
            "You have uncommitted changes that pulling may overwrite or conflict with. Continue?",
            false,
        )?;
        if !proceed {
            info!("Sync cancelled over uncommitted changes");
            return Ok(SyncOutcome::Cancelled);
        }
    }

    let mut branch = repo::current_branch(git).await?;
    if !branch.is_protected() {
        progress
            .on_warning(&format!(
                "Currently on '{}'; syncing is meant to happen on main/master",
                branch.name
            ))
            .await;
        if prompter.confirm("Switch to main before syncing?", true)? {
            progress.on_phase(Phase::SwitchingBranch).await;
            branch.name = switch_to_trunk(git).await?;
        }
    }

    progress.on_phase(Phase::ConfiguringUpstream).await;
    match ensure_upstream(git, upstream).await? {
        UpstreamStatus::Existing(url) => {
            progress
                .on_message(&format!("{} already configured: {url}", upstream.name))
                .await;
        }
        UpstreamStatus::Added => {
            progress
                .on_message(&format!("Added {} -> {}", upstream.name, upstream.url))
                .await;
        }
    }

    progress.on_phase(Phase::Fetching).await;
    git.run_checked(Stage::Fetch, &["fetch", &upstream.name])
        .await?;

    progress.on_phase(Phase::Pulling).await;
    let upstream_branch = pull_trunk(git, &upstream.name, progress).await?;

    let head = repo::last_commit(git).await?;
    progress.on_phase(Phase::Complete).await;

    Ok(SyncOutcome::Synced {
        branch: branch.name,
        upstream_branch,
        head,
    })
}

/// Check out `main`, or `master` when there is no local `main`
async fn switch_to_trunk(git: &Git<'_>) -> Result<String> {
    let [main, master] = PROTECTED_BRANCHES;
    let target = if repo::branch_exists(git, main).await? {
        main
    } else {
        master
    };
    git.run_checked(Stage::Checkout, &["checkout", target])
        .await?;
    info!("Switched to {target}");
    Ok(target.to_string())
}

/// Pull `main` from the remote; on failure try `master` once
async fn pull_trunk(
    git: &Git<'_>,
    remote: &str,
    progress: &dyn ProgressCallback,
) -> Result<String> {
    let [main, master] = PROTECTED_BRANCHES;

    let first = git.run(&["pull", remote, main]).await?;
    if first.success() {
        return Ok(main.to_string());
    }

    warn!("git pull {remote} {main} failed: {}", first.combined());
    progress
        .on_warning(&format!("Pulling {remote}/{main} failed, trying {master}"))
        .await;

    let second = git.run(&["pull", remote, master]).await?;
    if second.success() {
        return Ok(master.to_string());
    }

    Err(Error::GitCommandFailed {
        stage: Stage::Pull,
        exit_code: second.exit_code,
        output: format!(
            "{main}: {}\n{master}: {}",
            first.combined(),
            second.combined()
        ),
    })
}
