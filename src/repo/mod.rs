//! Git working-copy access
//!
//! Everything here shells out to `git` through a [`GitRunner`]:
//! - [`inspect`] - read-only state queries
//! - [`naming`] - collision-free branch names
//! - [`remote`] - upstream remote registration

pub mod inspect;
pub mod naming;
pub mod remote;
mod runner;

pub use inspect::{branch_exists, change_set, current_branch, is_dirty, last_commit, remote_url};
pub use naming::{DEFAULT_MAX_ATTEMPTS, resolve_unique, validate_branch_name};
pub use remote::{UpstreamStatus, ensure_upstream};
pub use runner::{GitOutput, GitRunner, SystemGit};

use crate::error::{Error, Result};
use crate::types::Stage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where to look for the working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLocation {
    /// Use this path as the root directly
    Explicit(PathBuf),
    /// Walk `levels_up` parents from `from`
    Relative {
        /// Invocation directory
        from: PathBuf,
        /// Number of parent directories between `from` and the root
        levels_up: usize,
    },
}

/// A working-copy root believed to contain git metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    root: PathBuf,
}

impl RepositoryHandle {
    /// Open a repository at an explicit root
    pub fn open(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root)?;
        if !root.join(".git").exists() {
            return Err(Error::NotARepository(root));
        }
        debug!("Using repository at {}", root.display());
        Ok(Self { root })
    }

    /// Resolve a [`RepoLocation`] to a handle
    pub fn discover(location: &RepoLocation) -> Result<Self> {
        match location {
            RepoLocation::Explicit(path) => Self::open(path),
            RepoLocation::Relative { from, levels_up } => {
                let mut root = std::path::absolute(from)?;
                for _ in 0..*levels_up {
                    if !root.pop() {
                        return Err(Error::NotARepository(root));
                    }
                }
                Self::open(&root)
            }
        }
    }

    /// Absolute path of the working copy
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A repository handle paired with the runner that drives it
#[derive(Clone, Copy)]
pub struct Git<'a> {
    runner: &'a dyn GitRunner,
    repo: &'a RepositoryHandle,
}

impl<'a> Git<'a> {
    /// Bind a runner to a repository
    pub const fn new(runner: &'a dyn GitRunner, repo: &'a RepositoryHandle) -> Self {
        Self { runner, repo }
    }

    /// The repository this binding operates on
    pub const fn repo(&self) -> &RepositoryHandle {
        self.repo
    }

    /// Run a command, returning its output whatever the exit status
    pub async fn run(&self, args: &[&str]) -> Result<GitOutput> {
        self.runner.run(self.repo.root(), args).await
    }

    /// Run a command that must succeed; failure is attributed to `stage`
    pub async fn run_checked(&self, stage: Stage, args: &[&str]) -> Result<GitOutput> {
        let output = self.run(args).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(Error::GitCommandFailed {
                stage,
                exit_code: output.exit_code,
                output: output.combined(),
            })
        }
    }
}
