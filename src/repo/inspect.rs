//! Read-only repository state queries
//!
//! None of these mutate the working copy. A query that legitimately finds
//! nothing (unknown ref, missing remote) is a negative result, not an error.

use crate::error::{Error, Result};
use crate::repo::Git;
use crate::types::{BranchRef, ChangeSet, Stage};

/// True iff `git status --porcelain` reports anything
pub async fn is_dirty(git: &Git<'_>) -> Result<bool> {
    let output = git
        .run_checked(Stage::Status, &["status", "--porcelain"])
        .await?;
    Ok(!output.stdout_trimmed().is_empty())
}

/// Changed and untracked paths, optionally restricted to `pathspec`
pub async fn change_set(git: &Git<'_>, pathspec: Option<&str>) -> Result<ChangeSet> {
    let mut args = vec!["status", "--porcelain", "-z"];
    if let Some(spec) = pathspec {
        args.extend(["--", spec]);
    }
    let output = git.run_checked(Stage::Status, &args).await?;
    Ok(ChangeSet::from_porcelain_z(&output.stdout))
}

/// The checked-out branch
pub async fn current_branch(git: &Git<'_>) -> Result<BranchRef> {
    let output = git
        .run_checked(Stage::Status, &["rev-parse", "--abbrev-ref", "HEAD"])
        .await?;
    let name = output.stdout_trimmed();
    if name == "HEAD" || name.is_empty() {
        return Err(Error::DetachedHead);
    }
    Ok(BranchRef {
        name: name.to_string(),
        exists: true,
    })
}

/// Whether a local branch named `name` exists right now
pub async fn branch_exists(git: &Git<'_>, name: &str) -> Result<bool> {
    let refname = format!("refs/heads/{name}");
    let output = git
        .run(&["rev-parse", "--verify", "--quiet", &refname])
        .await?;
    Ok(output.success())
}

/// URL of remote `name`, if configured
pub async fn remote_url(git: &Git<'_>, name: &str) -> Result<Option<String>> {
    let output = git.run(&["remote", "get-url", name]).await?;
    let url = output.stdout_trimmed();
    if output.success() && !url.is_empty() {
        Ok(Some(url.to_string()))
    } else {
        Ok(None)
    }
}

/// One-line summary of HEAD, if there is a commit
pub async fn last_commit(git: &Git<'_>) -> Result<Option<String>> {
    let output = git.run(&["log", "-1", "--oneline"]).await?;
    let line = output.stdout_trimmed();
    if output.success() && !line.is_empty() {
        Ok(Some(line.to_string()))
    } else {
        Ok(None)
    }
}
