//! Mock pull request lookup for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use ctmd_tool::error::{Error, Result};
use ctmd_tool::platform::PullRequestLookup;
use ctmd_tool::types::PullRequest;
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `find_open_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindPrCall {
    pub head_owner: String,
    pub branch: String,
}

/// Mock lookup with canned responses per branch
///
/// Features:
/// - Configurable responses per branch
/// - Call tracking for verification
/// - Error injection for failure path testing
#[derive(Default)]
pub struct MockPullRequestLookup {
    responses: Mutex<HashMap<String, PullRequest>>,
    calls: Mutex<Vec<FindPrCall>>,
    error: Mutex<Option<String>>,
}

impl MockPullRequestLookup {
    /// Lookup that finds nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `pr` as open for `branch`
    pub fn with_open_pr(self, branch: &str, number: u64) -> Self {
        let pr = make_pr(branch, number);
        self.responses
            .lock()
            .unwrap()
            .insert(branch.to_string(), pr);
        self
    }

    /// Fail every lookup with a GitHub API error
    pub fn failing(self, message: &str) -> Self {
        *self.error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Calls made so far
    pub fn calls(&self) -> Vec<FindPrCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Pull request targeting the canonical repository's `main`
pub fn make_pr(branch: &str, number: u64) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/xylplm/media-saber-ctmd/pull/{number}"),
        title: format!("Update TMDB config ({branch})"),
    }
}

#[async_trait]
impl PullRequestLookup for MockPullRequestLookup {
    async fn find_open_pr(&self, head_owner: &str, branch: &str) -> Result<Option<PullRequest>> {
        self.calls.lock().unwrap().push(FindPrCall {
            head_owner: head_owner.to_string(),
            branch: branch.to_string(),
        });

        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(Error::GitHubApi(message));
        }
        Ok(self.responses.lock().unwrap().get(branch).cloned())
    }
}
