//! Pull request platform access
//!
//! Only used after a successful push, to point the user at an already-open
//! PR instead of the compare page.

mod detection;
mod github;

pub use detection::parse_repo_info;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::PullRequest;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Looks up open pull requests by head branch
#[async_trait]
pub trait PullRequestLookup: Send + Sync {
    /// Find an open PR whose head is `<head_owner>:<branch>`
    async fn find_open_pr(&self, head_owner: &str, branch: &str) -> Result<Option<PullRequest>>;
}

/// Where to send the user after a push
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrLink {
    /// A PR for this branch is already open
    Existing(PullRequest),
    /// Open a new PR from the compare page
    Compare(String),
}

impl PrLink {
    /// URL to display or open
    pub fn url(&self) -> &str {
        match self {
            Self::Existing(pr) => &pr.html_url,
            Self::Compare(url) => url,
        }
    }
}

/// Prefer an existing PR, falling back to the compare URL
///
/// Lookup failures are logged and never surface as errors.
pub async fn resolve_pr_link(
    lookup: Option<&dyn PullRequestLookup>,
    head_owner: Option<&str>,
    branch: &str,
    compare_url: &str,
) -> PrLink {
    let (Some(lookup), Some(owner)) = (lookup, head_owner) else {
        debug!("Skipping PR lookup for {branch}");
        return PrLink::Compare(compare_url.to_string());
    };

    match lookup.find_open_pr(owner, branch).await {
        Ok(Some(pr)) => PrLink::Existing(pr),
        Ok(None) => PrLink::Compare(compare_url.to_string()),
        Err(e) => {
            warn!("Could not look up existing PR for {owner}:{branch}: {e}");
            PrLink::Compare(compare_url.to_string())
        }
    }
}
