//! Repository identity from remote URLs

use crate::error::{Error, Result};
use crate::types::ProjectIdentity;
use regex::Regex;
use std::sync::OnceLock;

fn ssh_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@/]+@([^:]+):(.+?)(?:\.git)?/?$").expect("valid ssh regex"))
}

/// Parse owner/repo/host from a git remote URL
///
/// Accepts `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `https://host/owner/repo(.git)`.
pub fn parse_repo_info(url: &str) -> Result<ProjectIdentity> {
    let (host, path) = if let Some(caps) = ssh_pattern().captures(url) {
        (caps[1].to_string(), caps[2].to_string())
    } else {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::Parse(format!("cannot parse remote URL {url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::Parse(format!("remote URL has no host: {url}")))?
            .to_string();
        let path = parsed.path().trim_matches('/');
        (host, path.strip_suffix(".git").unwrap_or(path).to_string())
    };

    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    let [owner, repo] = parts.as_slice() else {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    };

    Ok(ProjectIdentity {
        host,
        owner: (*owner).to_string(),
        repo: (*repo).to_string(),
    })
}
