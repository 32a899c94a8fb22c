//! Shared test utilities

pub mod fake_git;
pub mod fixtures;
pub mod mock_platform;

#[allow(unused_imports)]
pub use fake_git::{FakeGit, RepoState};
#[allow(unused_imports)]
pub use fixtures::{RecordingProgress, ScriptedPrompter, UPSTREAM_URL, repo_fixture, settings_for};
#[allow(unused_imports)]
pub use mock_platform::{MockPullRequestLookup, make_pr};
