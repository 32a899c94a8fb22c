//! Two-phase submission engine
//!
//! Handles the workflow of turning fetched metadata into a pushed branch:
//! 1. Planning - inspect the tree and collect every decision (read-only)
//! 2. Execution - branch, stage, commit, push, derive the compare URL

mod execute;
mod plan;

pub use execute::{SubmissionResult, execute_submission};
pub use plan::{Planned, SubmissionPlan, plan_submission};

use crate::repo::DEFAULT_MAX_ATTEMPTS;
use crate::types::ProjectIdentity;

/// Branch name used when the user does not type one
pub const DEFAULT_BRANCH_NAME: &str = "update-tmdb-config";

/// Commit message used when the user does not type one
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update TMDB config metadata";

/// Directory (relative to the repository root) holding fetched metadata
pub const OUTPUT_DIR: &str = "tmdb_config/";

/// Knobs for a submission run
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// Subtree that is inspected and staged; nothing outside it is added
    pub output_dir: String,
    /// Remote new branches are pushed to
    pub push_remote: String,
    /// Base of the compare URL
    pub compare_base: String,
    /// Branch name offered by default
    pub default_branch_name: String,
    /// Commit message offered by default
    pub default_commit_message: String,
    /// Suffixes tried when resolving a free branch name
    pub max_name_attempts: usize,
    /// Repository the compare URL points at
    pub project: ProjectIdentity,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            output_dir: OUTPUT_DIR.to_string(),
            push_remote: "origin".to_string(),
            compare_base: "main".to_string(),
            default_branch_name: DEFAULT_BRANCH_NAME.to_string(),
            default_commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            max_name_attempts: DEFAULT_MAX_ATTEMPTS,
            project: ProjectIdentity::default(),
        }
    }
}
