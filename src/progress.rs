//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (interactive menu, one-shot CLI,
//! tests) to receive progress updates while the workflow engines run.

use crate::types::ChangeSet;
use async_trait::async_trait;
use std::fmt;

/// Workflow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inspecting the working tree
    CheckingTree,
    /// Switching to the trunk branch
    SwitchingBranch,
    /// Making sure the upstream remote exists
    ConfiguringUpstream,
    /// Fetching from upstream
    Fetching,
    /// Pulling the upstream branch
    Pulling,
    /// Picking a branch name
    ResolvingBranch,
    /// Creating and checking out the new branch
    CreatingBranch,
    /// Staging the output directory
    Staging,
    /// Creating the commit
    Committing,
    /// Pushing to the remote
    Pushing,
    /// Workflow finished
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CheckingTree => "Checking working tree",
            Self::SwitchingBranch => "Switching branch",
            Self::ConfiguringUpstream => "Checking upstream remote",
            Self::Fetching => "Fetching upstream",
            Self::Pulling => "Pulling upstream",
            Self::ResolvingBranch => "Resolving branch name",
            Self::CreatingBranch => "Creating branch",
            Self::Staging => "Staging changes",
            Self::Committing => "Committing",
            Self::Pushing => "Pushing",
            Self::Complete => "Done",
        };
        f.write_str(s)
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during sync and submit.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called with the changes a run is about to act on
    async fn on_changes(&self, changes: &ChangeSet);

    /// Called for conditions worth flagging that do not stop the run
    async fn on_warning(&self, message: &str);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_changes(&self, _changes: &ChangeSet) {}
    async fn on_warning(&self, _message: &str) {}
    async fn on_message(&self, _message: &str) {}
}
