//! Decision callback used at the workflow's interactive gates
//!
//! The engines never read the terminal themselves; every question goes
//! through a [`Prompter`] so runs can be scripted.

use crate::error::Result;
use crate::types::SubmissionMode;

/// Answers the questions the sync and submit engines ask
pub trait Prompter: Send + Sync {
    /// Yes/no question
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Pick how the submission lands on the remote
    fn choose_mode(&self) -> Result<SubmissionMode>;

    /// Branch name for a new branch; blank means "use the default"
    fn request_branch_name(&self, default: &str) -> Result<String>;

    /// Commit message; blank means "use the default"
    fn request_commit_message(&self, default: &str) -> Result<String>;
}

/// Use `input` unless it is blank
pub fn or_default(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
