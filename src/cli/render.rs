//! Rendering of workflow results and pull request links

use crate::cli::style::{Stream, Stylize, arrow, check, cross, hyperlink_url};
use anstream::{eprintln, println};
use ctmd_tool::auth::get_github_auth;
use ctmd_tool::browser;
use ctmd_tool::platform::{
    GitHubService, PrLink, PullRequestLookup, parse_repo_info, resolve_pr_link,
};
use ctmd_tool::repo::{Git, RepositoryHandle, SystemGit, remote_url};
use ctmd_tool::types::{PullRequest, Stage, WorkflowResult};
use ctmd_tool::workflow::WorkflowSettings;
use tracing::{debug, warn};

/// One-line summary of a result, without styling
pub fn headline(result: &WorkflowResult) -> String {
    match result {
        WorkflowResult::NoOpClean => "Nothing to commit under tmdb_config/".to_string(),
        WorkflowResult::Cancelled => "Cancelled, nothing was changed".to_string(),
        WorkflowResult::Synced {
            branch,
            upstream_branch,
            ..
        } => format!("Synced '{branch}' with upstream/{upstream_branch}"),
        WorkflowResult::Committed { branch, mode, .. } => {
            format!("Committed and pushed to '{branch}' ({mode})")
        }
        WorkflowResult::ProtectedBranch { branch } => {
            format!("Refusing to commit directly on '{branch}'")
        }
        WorkflowResult::Failed { stage, .. } => format!("Failed during {stage}"),
    }
}

/// Follow-up advice for results that need it
pub fn hint(result: &WorkflowResult) -> Option<String> {
    match result {
        WorkflowResult::ProtectedBranch { .. } => Some(
            "Run submit again and choose \"Create a new branch\", or check out a feature branch first"
                .to_string(),
        ),
        WorkflowResult::Failed {
            stage: Stage::Push, ..
        } => Some(
            "The commit was created locally; fix the problem and run `git push` yourself".to_string(),
        ),
        WorkflowResult::Failed {
            stage: Stage::Pull, ..
        } => Some("Resolve any merge conflicts, then run sync again".to_string()),
        WorkflowResult::Failed {
            stage: Stage::Timeout,
            ..
        } => Some("Raise git_timeout_secs in the config file if your network is slow".to_string()),
        _ => None,
    }
}

/// Print a result to the terminal
pub fn print_result(result: &WorkflowResult) {
    let line = headline(result);
    match result {
        WorkflowResult::NoOpClean | WorkflowResult::Cancelled => {
            println!("{}", line.muted());
        }
        WorkflowResult::Synced { head, .. } => {
            println!("{} {}", check(), line.success());
            if let Some(head) = head {
                println!("  {}", head.muted());
            }
        }
        WorkflowResult::Committed { commit_message, .. } => {
            println!("{} {}", check(), line.success());
            println!("  {}", commit_message.muted());
        }
        WorkflowResult::ProtectedBranch { .. } => {
            eprintln!("{} {}", cross(), line.error());
        }
        WorkflowResult::Failed { cause, .. } => {
            eprintln!("{} {}", cross(), line.error());
            for cause_line in cause.lines() {
                eprintln!("  {}", cause_line.muted().for_stderr());
            }
        }
    }

    if let Some(hint) = hint(result) {
        eprintln!("{} {}", arrow().for_stderr(), hint.warn());
    }
}

/// Point the user at an open PR for `branch`, or at the compare page
///
/// Every step is best effort; problems only downgrade the link.
pub async fn announce_pull_request(
    runner: &SystemGit,
    settings: &WorkflowSettings,
    branch: &str,
    compare_url: &str,
    open: bool,
) {
    let head_owner = fork_owner(runner, settings).await;

    let service = match get_github_auth().await {
        Ok(auth) => GitHubService::new(&auth.token, settings.submit.project.clone())
            .map_err(|e| debug!("GitHub client unavailable: {e}"))
            .ok(),
        Err(e) => {
            debug!("Skipping PR lookup: {e}");
            None
        }
    };
    let lookup = service.as_ref().map(|s| s as &dyn PullRequestLookup);

    let link = resolve_pr_link(lookup, head_owner.as_deref(), branch, compare_url).await;
    match &link {
        PrLink::Existing(pr) => println!(
            "{} {} is open: {}",
            arrow(),
            pr_label(pr).accent(),
            hyperlink_url(Stream::Stdout, &pr.html_url)
        ),
        PrLink::Compare(url) => println!(
            "{} Open a pull request: {}",
            arrow(),
            hyperlink_url(Stream::Stdout, url)
        ),
    }

    if open {
        if let Err(e) = browser::open_url(link.url()) {
            warn!("Could not open browser: {e}");
        }
    }
}

/// `#42 "Title"`, or just the number when the title is blank
fn pr_label(pr: &PullRequest) -> String {
    let title = pr.title.trim();
    if title.is_empty() {
        format!("Pull request #{}", pr.number)
    } else {
        format!("Pull request #{} \"{title}\"", pr.number)
    }
}

/// Owner of the `origin` remote, if it parses
async fn fork_owner(runner: &SystemGit, settings: &WorkflowSettings) -> Option<String> {
    let repo = RepositoryHandle::discover(&settings.location).ok()?;
    let git = Git::new(runner, &repo);
    let url = remote_url(&git, &settings.submit.push_remote).await.ok()??;
    parse_repo_info(&url).ok().map(|id| id.owner)
}
