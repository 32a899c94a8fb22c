//! Fake git runner for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use ctmd_tool::error::{Error, Result};
use ctmd_tool::repo::{GitOutput, GitRunner};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Commands that change the repository or a remote
const WRITE_COMMANDS: [&str; 6] = ["checkout", "add", "commit", "push", "pull", "fetch"];

/// Simulated repository state
#[derive(Debug, Clone)]
pub struct RepoState {
    /// Local branches
    pub branches: BTreeSet<String>,
    /// Checked-out branch (`None` = detached HEAD)
    pub current: Option<String>,
    /// Configured remotes
    pub remotes: BTreeMap<String, String>,
    /// Branches present on every remote
    pub remote_branches: BTreeSet<String>,
    /// Porcelain entries for the whole tree: (status, path)
    pub dirty: Vec<(String, String)>,
    /// Paths staged by `add`
    pub staged: Vec<String>,
    /// (branch, message) per commit, oldest first
    pub commits: Vec<(String, String)>,
    /// Argument lists of every push
    pub pushes: Vec<Vec<String>>,
}

impl Default for RepoState {
    fn default() -> Self {
        Self {
            branches: BTreeSet::from(["main".to_string()]),
            current: Some("main".to_string()),
            remotes: BTreeMap::from([(
                "origin".to_string(),
                "git@github.com:contributor/media-saber-ctmd.git".to_string(),
            )]),
            remote_branches: BTreeSet::from(["main".to_string()]),
            dirty: Vec::new(),
            staged: Vec::new(),
            commits: vec![("main".to_string(), "Initial import".to_string())],
            pushes: Vec::new(),
        }
    }
}

enum Injected {
    Output(GitOutput),
    Timeout,
}

/// In-memory stand-in for the `git` executable
///
/// Features:
/// - Simulated branches, remotes, working tree and commits
/// - Call tracking with exact argument lists
/// - Failure and timeout injection by argument prefix
pub struct FakeGit {
    state: Mutex<RepoState>,
    calls: Mutex<Vec<Vec<String>>>,
    injected: Mutex<Vec<(Vec<String>, Injected)>>,
    missing: bool,
}

impl FakeGit {
    /// Repository on `main` with a clean tree and an `origin` remote
    pub fn new() -> Self {
        Self::with_state(RepoState::default())
    }

    /// Start from an explicit state
    pub fn with_state(state: RepoState) -> Self {
        Self {
            state: Mutex::new(state),
            calls: Mutex::new(Vec::new()),
            injected: Mutex::new(Vec::new()),
            missing: false,
        }
    }

    /// Behave as if git were not installed
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::new()
        }
    }

    /// Add local branches
    pub fn with_branches(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.branches.extend(names.iter().map(ToString::to_string));
        }
        self
    }

    /// Check out `name` (created if missing)
    pub fn on_branch(self, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.branches.insert(name.to_string());
            state.current = Some(name.to_string());
        }
        self
    }

    /// Detach HEAD
    pub fn detached(self) -> Self {
        self.state.lock().unwrap().current = None;
        self
    }

    /// Add a remote
    pub fn with_remote(self, name: &str, url: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .remotes
            .insert(name.to_string(), url.to_string());
        self
    }

    /// Mark a path as changed (`"??"`, `" M"`, ...)
    pub fn with_change(self, status: &str, path: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .dirty
            .push((status.to_string(), path.to_string()));
        self
    }

    /// Replace the set of branches the remotes carry
    pub fn with_remote_branches(self, names: &[&str]) -> Self {
        self.state.lock().unwrap().remote_branches =
            names.iter().map(ToString::to_string).collect();
        self
    }

    /// Make any command starting with `prefix` return `output`
    pub fn fail_on(&self, prefix: &[&str], output: GitOutput) {
        self.injected
            .lock()
            .unwrap()
            .push((to_strings(prefix), Injected::Output(output)));
    }

    /// Make any command starting with `prefix` time out
    pub fn timeout_on(&self, prefix: &[&str]) {
        self.injected
            .lock()
            .unwrap()
            .push((to_strings(prefix), Injected::Timeout));
    }

    /// Snapshot of the simulated state
    pub fn state(&self) -> RepoState {
        self.state.lock().unwrap().clone()
    }

    /// Every call, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that start with `prefix`
    pub fn calls_starting_with(&self, prefix: &[&str]) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|call| starts_with(call, prefix))
            .collect()
    }

    /// Whether a call starting with `prefix` was made
    pub fn was_called(&self, prefix: &[&str]) -> bool {
        !self.calls_starting_with(prefix).is_empty()
    }

    /// Calls that mutate the repository or a remote
    pub fn write_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|call| {
                let first = call.first().map(String::as_str).unwrap_or_default();
                WRITE_COMMANDS.contains(&first)
                    || (first == "remote" && call.get(1).map(String::as_str) == Some("add"))
            })
            .collect()
    }

    fn injected_for(&self, args: &[String]) -> Option<Result<GitOutput>> {
        let injected = self.injected.lock().unwrap();
        injected
            .iter()
            .find(|(prefix, _)| {
                let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
                starts_with(args, &prefix)
            })
            .map(|(_, behavior)| match behavior {
                Injected::Output(output) => Ok(output.clone()),
                Injected::Timeout => Err(Error::Timeout {
                    command: args.join(" "),
                    after: Duration::from_secs(1),
                }),
            })
    }

    fn simulate(&self, args: &[&str]) -> GitOutput {
        let mut state = self.state.lock().unwrap();
        match args {
            ["status", "--porcelain"] => GitOutput::ok(porcelain(&state.dirty, None)),
            ["status", "--porcelain", "-z"] => GitOutput::ok(porcelain_z(&state.dirty, None)),
            ["status", "--porcelain", "-z", "--", spec] => {
                GitOutput::ok(porcelain_z(&state.dirty, Some(*spec)))
            }
            ["rev-parse", "--abbrev-ref", "HEAD"] => {
                GitOutput::ok(format!("{}\n", state.current.as_deref().unwrap_or("HEAD")))
            }
            ["rev-parse", "--verify", "--quiet", refname] => {
                let name = refname.strip_prefix("refs/heads/").unwrap_or(*refname);
                if state.branches.contains(name) {
                    GitOutput::ok("0123456789abcdef0123456789abcdef01234567\n")
                } else {
                    GitOutput::failed(1, "")
                }
            }
            ["remote", "get-url", name] => match state.remotes.get(*name) {
                Some(url) => GitOutput::ok(format!("{url}\n")),
                None => GitOutput::failed(2, format!("error: No such remote '{name}'\n")),
            },
            ["remote", "add", name, url] => {
                if state.remotes.contains_key(*name) {
                    GitOutput::failed(3, format!("error: remote {name} already exists.\n"))
                } else {
                    state.remotes.insert((*name).to_string(), (*url).to_string());
                    GitOutput::ok("")
                }
            }
            ["fetch", remote] => {
                if state.remotes.contains_key(*remote) {
                    GitOutput::ok("")
                } else {
                    GitOutput::failed(128, not_a_repository(remote))
                }
            }
            ["pull", remote, branch] => {
                if !state.remotes.contains_key(*remote) {
                    GitOutput::failed(1, not_a_repository(remote))
                } else if state.remote_branches.contains(*branch) {
                    GitOutput::ok("Already up to date.\n")
                } else {
                    GitOutput::failed(1, format!("fatal: couldn't find remote ref {branch}\n"))
                }
            }
            ["checkout", "-b", name] => {
                if state.branches.contains(*name) {
                    let message = format!("fatal: a branch named '{name}' already exists\n");
                    GitOutput::failed(128, message)
                } else {
                    state.branches.insert((*name).to_string());
                    state.current = Some((*name).to_string());
                    GitOutput {
                        exit_code: Some(0),
                        stdout: String::new(),
                        stderr: format!("Switched to a new branch '{name}'\n"),
                    }
                }
            }
            ["checkout", name] => {
                if state.branches.contains(*name) {
                    state.current = Some((*name).to_string());
                    GitOutput::ok("")
                } else {
                    let message =
                        format!("error: pathspec '{name}' did not match any file(s) known to git\n");
                    GitOutput::failed(1, message)
                }
            }
            ["add", spec] => {
                let spec = spec.to_string();
                let matched: Vec<String> = state
                    .dirty
                    .iter()
                    .filter(|(_, path)| path.starts_with(&spec))
                    .map(|(_, path)| path.clone())
                    .collect();
                state.staged.extend(matched);
                GitOutput::ok("")
            }
            ["commit", "-m", message] => {
                if state.staged.is_empty() {
                    return GitOutput {
                        exit_code: Some(1),
                        stdout: "nothing to commit, working tree clean\n".to_string(),
                        stderr: String::new(),
                    };
                }
                let staged = std::mem::take(&mut state.staged);
                state.dirty.retain(|(_, path)| !staged.contains(path));
                let branch = state.current.clone().unwrap_or_default();
                state.commits.push((branch, (*message).to_string()));
                let head = state.current.as_deref().unwrap_or("HEAD");
                GitOutput::ok(format!("[{head}] {message}\n"))
            }
            ["push", rest @ ..] => {
                state.pushes.push(to_strings(rest));
                GitOutput::ok("")
            }
            ["log", "-1", "--oneline"] => match state.commits.last() {
                Some((_, message)) => GitOutput::ok(format!("abc1234 {message}\n")),
                None => GitOutput::failed(
                    128,
                    "fatal: your current branch does not have any commits yet\n",
                ),
            },
            other => GitOutput::failed(129, format!("fake git: unsupported command {other:?}\n")),
        }
    }
}

impl Default for FakeGit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitRunner for FakeGit {
    async fn run(&self, _root: &Path, args: &[&str]) -> Result<GitOutput> {
        let owned = to_strings(args);
        self.calls.lock().unwrap().push(owned.clone());

        if let Some(result) = self.injected_for(&owned) {
            return result;
        }
        Ok(self.simulate(args))
    }

    async fn check_available(&self) -> Result<()> {
        if self.missing {
            Err(Error::ToolNotFound("git".to_string()))
        } else {
            Ok(())
        }
    }
}

fn porcelain(dirty: &[(String, String)], spec: Option<&str>) -> String {
    entries(dirty, spec)
        .map(|(status, path)| format!("{status} {path}\n"))
        .collect()
}

fn porcelain_z(dirty: &[(String, String)], spec: Option<&str>) -> String {
    entries(dirty, spec)
        .map(|(status, path)| format!("{status} {path}\0"))
        .collect()
}

fn entries<'a>(
    dirty: &'a [(String, String)],
    spec: Option<&'a str>,
) -> impl Iterator<Item = &'a (String, String)> {
    dirty
        .iter()
        .filter(move |(_, path)| spec.is_none_or(|s| path.starts_with(s)))
}

fn not_a_repository(remote: &str) -> String {
    format!("fatal: '{remote}' does not appear to be a git repository\n")
}

fn to_strings(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

fn starts_with(call: &[String], prefix: &[&str]) -> bool {
    call.len() >= prefix.len() && call.iter().zip(prefix).all(|(a, b)| a == b)
}
