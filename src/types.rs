//! Core types for ctmd-tool

use serde::{Deserialize, Serialize};
use std::fmt;

/// Branch names the engine never commits on directly
pub const PROTECTED_BRANCHES: [&str; 2] = ["main", "master"];

/// Whether a branch name is one of the protected trunk names
pub fn is_protected(name: &str) -> bool {
    PROTECTED_BRANCHES.contains(&name)
}

/// A local branch and whether it existed when last queried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Branch name (without `refs/heads/`)
    pub name: String,
    /// Existence at query time; never reuse across operations
    pub exists: bool,
}

impl BranchRef {
    /// Whether this is `main` or `master`
    pub fn is_protected(&self) -> bool {
        is_protected(&self.name)
    }
}

/// A git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRef {
    /// Remote name (e.g., "origin", "upstream")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// One entry of `git status --porcelain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    /// Two-character status code (e.g., "??", " M")
    pub status: String,
    /// Path relative to the repository root
    pub path: String,
}

/// Modified and untracked paths under a subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Changed entries in porcelain order
    pub entries: Vec<ChangedPath>,
}

impl ChangeSet {
    /// Parse `git status --porcelain -z` output
    ///
    /// Paths arrive unquoted. Rename and copy entries are followed by a
    /// second field holding the source path, which is skipped.
    pub fn from_porcelain_z(output: &str) -> Self {
        let mut entries = Vec::new();
        let mut fields = output.split('\0');
        while let Some(field) = fields.next() {
            let (Some(status), Some(path)) = (field.get(..2), field.get(3..)) else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            if status.contains(['R', 'C']) {
                fields.next();
            }
            entries.push(ChangedPath {
                status: status.to_string(),
                path: path.to_string(),
            });
        }
        Self { entries }
    }

    /// True when nothing changed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of changed paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// How a submission lands on the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
    /// Create a fresh branch and push it with upstream tracking
    NewBranch,
    /// Commit on the current branch and push plainly
    ExistingBranch,
}

impl fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewBranch => write!(f, "new branch"),
            Self::ExistingBranch => write!(f, "existing branch"),
        }
    }
}

/// Workflow stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Tool and repository checks before any git query
    Preflight,
    /// Working tree / branch queries
    Status,
    /// Branch switch or creation
    Checkout,
    /// Upstream remote registration
    Remote,
    /// `git fetch`
    Fetch,
    /// `git pull`
    Pull,
    /// Finding a free branch name
    BranchName,
    /// `git add`
    Add,
    /// `git commit`
    Commit,
    /// `git push`
    Push,
    /// Reading an answer from the user
    Prompt,
    /// A git invocation exceeded its time limit
    Timeout,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Preflight => "preflight",
            Self::Status => "status",
            Self::Checkout => "checkout",
            Self::Remote => "remote",
            Self::Fetch => "fetch",
            Self::Pull => "pull",
            Self::BranchName => "branch-name",
            Self::Add => "add",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::Prompt => "prompt",
            Self::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// Outcome of one workflow run, rendered by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowResult {
    /// Nothing to commit under the output directory
    NoOpClean,
    /// The user declined at a confirmation gate
    Cancelled,
    /// Local branch now contains the upstream branch
    Synced {
        /// Branch that received the pull
        branch: String,
        /// Upstream branch that was pulled (`main` or `master`)
        upstream_branch: String,
        /// `git log -1 --oneline` after the pull
        head: Option<String>,
    },
    /// Changes were committed and pushed
    Committed {
        /// Branch the commit landed on
        branch: String,
        /// Commit message used
        commit_message: String,
        /// Compare URL for opening a pull request
        compare_url: String,
        /// Mode the submission ran in
        mode: SubmissionMode,
    },
    /// Committing on a protected branch was refused
    ProtectedBranch {
        /// The protected branch that was checked out
        branch: String,
    },
    /// A stage failed and the run stopped there
    Failed {
        /// Stage that failed
        stage: Stage,
        /// Human-readable cause including git's output
        cause: String,
    },
}

impl WorkflowResult {
    /// Whether the run ended in a rejection or failure
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::ProtectedBranch { .. } | Self::Failed { .. })
    }
}

/// A pull request found on GitHub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// PR title
    pub title: String,
}

/// Identity of the canonical repository pull requests target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    /// Web host (e.g., "github.com")
    pub host: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl Default for ProjectIdentity {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            owner: "xylplm".to_string(),
            repo: "media-saber-ctmd".to_string(),
        }
    }
}

impl ProjectIdentity {
    /// HTTPS clone URL
    pub fn clone_url(&self) -> String {
        format!("https://{}/{}/{}.git", self.host, self.owner, self.repo)
    }

    /// Web URL of the repository
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.repo)
    }

    /// Compare URL for opening a PR from `branch` into `base`
    ///
    /// Each `/`-separated segment of the branch is percent-encoded.
    pub fn compare_url(&self, base: &str, branch: &str) -> String {
        let encoded: Vec<String> = branch
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect();
        format!("{}/compare/{base}...{}", self.web_url(), encoded.join("/"))
    }
}
