//! Upstream remote registration

use crate::error::Result;
use crate::repo::{Git, remote_url};
use crate::types::{RemoteRef, Stage};
use tracing::info;

/// What [`ensure_upstream`] found or did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamStatus {
    /// Remote was already configured; its URL is left untouched
    Existing(String),
    /// Remote was added with the requested URL
    Added,
}

/// Register `remote` unless a remote with that name already exists
///
/// An existing remote is never rewritten, even if its URL differs.
pub async fn ensure_upstream(git: &Git<'_>, remote: &RemoteRef) -> Result<UpstreamStatus> {
    if let Some(url) = remote_url(git, &remote.name).await? {
        if url != remote.url {
            info!(
                "Remote {} points at {url}, not {}; leaving it as is",
                remote.name, remote.url
            );
        }
        return Ok(UpstreamStatus::Existing(url));
    }

    git.run_checked(Stage::Remote, &["remote", "add", &remote.name, &remote.url])
        .await?;
    info!("Added remote {} -> {}", remote.name, remote.url);
    Ok(UpstreamStatus::Added)
}
