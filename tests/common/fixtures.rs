//! Test fixtures: scripted answers, recorded progress, repository settings
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use ctmd_tool::error::{Error, Result};
use ctmd_tool::progress::{Phase, ProgressCallback};
use ctmd_tool::prompt::Prompter;
use ctmd_tool::repo::RepoLocation;
use ctmd_tool::submit::SubmitOptions;
use ctmd_tool::types::{ChangeSet, RemoteRef, SubmissionMode};
use ctmd_tool::workflow::WorkflowSettings;
use std::collections::VecDeque;
use std::sync::Mutex;
use tempfile::TempDir;

/// Canonical repository URL used by the fixtures
pub const UPSTREAM_URL: &str = "https://github.com/xylplm/media-saber-ctmd.git";

/// A directory that passes the `.git` check, plus settings pointing at it
pub fn repo_fixture() -> (TempDir, WorkflowSettings) {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    let settings = settings_for(RepoLocation::Explicit(dir.path().to_path_buf()));
    (dir, settings)
}

/// Default settings for a repository location
pub fn settings_for(location: RepoLocation) -> WorkflowSettings {
    WorkflowSettings {
        location,
        upstream: RemoteRef {
            name: "upstream".to_string(),
            url: UPSTREAM_URL.to_string(),
        },
        submit: SubmitOptions::default(),
    }
}

/// Prompter that replays queued answers and records every question
///
/// Running out of answers yields a prompt error, so an unexpected question
/// shows up as a failed run.
#[derive(Default)]
pub struct ScriptedPrompter {
    confirms: Mutex<VecDeque<bool>>,
    modes: Mutex<VecDeque<SubmissionMode>>,
    branch_names: Mutex<VecDeque<String>>,
    messages: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    /// Prompter with no answers queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers to yes/no questions
    pub fn confirms(self, answers: &[bool]) -> Self {
        self.confirms.lock().unwrap().extend(answers);
        self
    }

    /// Queue a mode choice
    pub fn mode(self, mode: SubmissionMode) -> Self {
        self.modes.lock().unwrap().push_back(mode);
        self
    }

    /// Queue a typed branch name (`""` = accept default)
    pub fn branch_name(self, name: &str) -> Self {
        self.branch_names.lock().unwrap().push_back(name.to_string());
        self
    }

    /// Queue a typed commit message (`""` = accept default)
    pub fn message(self, message: &str) -> Self {
        self.messages.lock().unwrap().push_back(message.to_string());
        self
    }

    /// Questions asked, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn record(&self, question: &str) {
        self.asked.lock().unwrap().push(question.to_string());
    }
}

fn next<T>(queue: &Mutex<VecDeque<T>>, question: &str) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .ok_or_else(|| Error::Prompt(format!("no scripted answer for: {question}")))
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, _default: bool) -> Result<bool> {
        self.record(question);
        next(&self.confirms, question)
    }

    fn choose_mode(&self) -> Result<SubmissionMode> {
        self.record("mode");
        next(&self.modes, "mode")
    }

    fn request_branch_name(&self, _default: &str) -> Result<String> {
        self.record("branch name");
        next(&self.branch_names, "branch name")
    }

    fn request_commit_message(&self, _default: &str) -> Result<String> {
        self.record("commit message");
        next(&self.messages, "commit message")
    }
}

/// Progress callback that keeps everything it is told
#[derive(Default)]
pub struct RecordingProgress {
    /// Phases entered
    pub phases: Mutex<Vec<Phase>>,
    /// Change sets shown
    pub changes: Mutex<Vec<ChangeSet>>,
    /// Warnings raised
    pub warnings: Mutex<Vec<String>>,
    /// Status messages
    pub messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings raised so far
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    /// Phases entered so far
    pub fn phases(&self) -> Vec<Phase> {
        self.phases.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.phases.lock().unwrap().push(phase);
    }

    async fn on_changes(&self, changes: &ChangeSet) {
        self.changes.lock().unwrap().push(changes.clone());
    }

    async fn on_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
