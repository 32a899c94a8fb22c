//! Branch name validation and collision-free resolution

use crate::error::{Error, Result};
use crate::repo::{Git, branch_exists};
use crate::types::BranchRef;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Suffixes tried before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

fn forbidden_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[\x00-\x20\x7f~^:?*\[\\]|\.\.|@\{|//")
            .expect("hardcoded refname pattern is valid")
    })
}

/// Reject names git would not accept as a branch refname
pub fn validate_branch_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "@"
        || name.starts_with('-')
        || name.starts_with('/')
        || name.ends_with('/')
        || name.ends_with('.')
        || name.ends_with(".lock")
        || name.split('/').any(|part| part.starts_with('.'))
        || forbidden_pattern().is_match(name);

    if invalid {
        Err(Error::InvalidBranchName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Find a branch name that does not exist yet
///
/// Returns `base` if free, otherwise the first free `base-2`, `base-3`, ...
/// Existence is queried live for every candidate.
pub async fn resolve_unique(git: &Git<'_>, base: &str, max_attempts: usize) -> Result<BranchRef> {
    if !branch_exists(git, base).await? {
        return Ok(BranchRef {
            name: base.to_string(),
            exists: false,
        });
    }

    for n in 2..max_attempts.saturating_add(2) {
        let candidate = format!("{base}-{n}");
        if !branch_exists(git, &candidate).await? {
            debug!("Resolved branch name {base} -> {candidate}");
            return Ok(BranchRef {
                name: candidate,
                exists: false,
            });
        }
    }

    Err(Error::NameResolutionExhausted {
        base: base.to_string(),
        attempts: max_attempts,
    })
}
