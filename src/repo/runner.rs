//! Command-execution abstraction over the `git` executable

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code (`None` if killed by a signal)
    pub exit_code: Option<i32>,
    /// Raw stdout (untrimmed - porcelain output is column-sensitive)
    pub stdout: String,
    /// Raw stderr
    pub stderr: String,
}

impl GitOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status 0
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Stdout with surrounding whitespace removed
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Stdout and stderr joined, for diagnostics
    pub fn combined(&self) -> String {
        let out = self.stdout.trim();
        let err = self.stderr.trim();
        match (out.is_empty(), err.is_empty()) {
            (true, _) => err.to_string(),
            (false, true) => out.to_string(),
            (false, false) => format!("{out}\n{err}"),
        }
    }
}

/// Runs git with an argument list against a working copy
///
/// Non-zero exits are returned as `Ok` with the status recorded; `Err` is
/// reserved for failing to run the tool at all (missing binary, timeout).
/// Tests substitute a fake to assert exact argument lists.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run `git -C <root> <args...>`
    async fn run(&self, root: &Path, args: &[&str]) -> Result<GitOutput>;

    /// Check the executable can be spawned at all
    async fn check_available(&self) -> Result<()>;
}

/// Runner that spawns the real `git` binary from `PATH`
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
    timeout: Option<Duration>,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout: None,
        }
    }
}

impl SystemGit {
    /// Runner for `git` with no time limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill any invocation that runs longer than `timeout`
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a different executable (e.g., an absolute path)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn spawn_error(&self, err: std::io::Error) -> Error {
        if err.kind() == ErrorKind::NotFound || err.kind() == ErrorKind::PermissionDenied {
            Error::ToolNotFound(self.program.clone())
        } else {
            Error::Io(err)
        }
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, root: &Path, args: &[&str]) -> Result<GitOutput> {
        debug!("git -C {} {}", root.display(), args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.arg("-C")
            .arg(root)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| Error::Timeout {
                    command: args.join(" "),
                    after: limit,
                })?,
            None => cmd.output().await,
        }
        .map_err(|e| self.spawn_error(e))?;

        let result = GitOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success() {
            debug!(
                "git {} exited with {:?}: {}",
                args.join(" "),
                result.exit_code,
                result.stderr.trim()
            );
        }

        Ok(result)
    }

    async fn check_available(&self) -> Result<()> {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_output() {
        let out = GitOutput {
            exit_code: Some(1),
            stdout: "CONFLICT (content)\n".to_string(),
            stderr: "Automatic merge failed\n".to_string(),
        };
        assert_eq!(out.combined(), "CONFLICT (content)\nAutomatic merge failed");
        assert_eq!(GitOutput::failed(128, "fatal: x\n").combined(), "fatal: x");
        assert_eq!(GitOutput::ok("abc\n").combined(), "abc");
    }

    #[test]
    fn test_success_requires_zero_exit() {
        assert!(GitOutput::ok("").success());
        assert!(!GitOutput::failed(1, "").success());
        let killed = GitOutput {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!killed.success());
    }

    #[tokio::test]
    async fn test_missing_program_is_tool_not_found() {
        let missing = "definitely-not-a-real-git-binary";
        let git = SystemGit::new().with_program(missing);
        let err = git.check_available().await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(ref p) if p == missing));
    }
}
