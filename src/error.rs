//! Error types for ctmd-tool

use crate::types::Stage;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the contribution workflow and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// The version-control executable could not be spawned
    #[error("`{0}` not found on PATH - install git and try again")]
    ToolNotFound(String),

    /// No `.git` entry at the resolved repository root
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// Refused to commit on, or create, a protected branch
    #[error("refusing to commit on protected branch '{0}' - create a new branch instead")]
    ProtectedBranch(String),

    /// Ran out of numbered suffixes while looking for a free branch name
    #[error("no free branch name derived from '{base}' after {attempts} attempts")]
    NameResolutionExhausted {
        /// Name the suffixes were appended to
        base: String,
        /// Number of suffixes tried
        attempts: usize,
    },

    /// Branch name git would reject as a refname
    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    /// HEAD does not point at a branch
    #[error("HEAD is detached - check out a branch first")]
    DetachedHead,

    /// A git invocation exited unsuccessfully
    #[error(
        "git {stage} failed{}: {output}",
        .exit_code.map(|c| format!(" (exit {c})")).unwrap_or_default()
    )]
    GitCommandFailed {
        /// Workflow stage that issued the command
        stage: Stage,
        /// Exit code, if the process was not killed by a signal
        exit_code: Option<i32>,
        /// Combined stdout/stderr, verbatim
        output: String,
    },

    /// A git invocation did not finish in time
    #[error("`git {command}` timed out after {}s", after.as_secs())]
    Timeout {
        /// Argument list that was running
        command: String,
        /// Configured limit
        after: Duration,
    },

    /// TMDB answered with a non-success status
    #[error("TMDB API error {status}: {body}")]
    TmdbApi {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Media id is not a TMDB numeric id
    #[error("invalid TMDB id '{0}' - expected a positive integer")]
    InvalidMediaId(String),

    /// Configuration missing or malformed
    #[error("config error: {0}")]
    Config(String),

    /// Authentication error
    #[error("auth error: {0}")]
    Auth(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Failed to read an answer from the user
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}
