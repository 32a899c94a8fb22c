//! CLI commands
//!
//! Command implementations for the `ctmd` binary.

mod contribute;
mod fetch;
mod menu;
mod progress;
mod prompt;
mod render;
mod style;
mod submit;
mod sync;

pub use contribute::run_contribute;
pub use fetch::run_fetch;
pub use menu::run_menu;
pub use progress::CliProgress;
pub use submit::{SubmitFlags, run_submit};
pub use sync::run_sync;

use ctmd_tool::config::Config;
use ctmd_tool::error::Result;
use ctmd_tool::repo::{RepoLocation, SystemGit};
use ctmd_tool::workflow::WorkflowSettings;
use std::path::PathBuf;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit repository root
    pub repo: Option<PathBuf>,
    /// Parent levels from the current directory to the root
    pub repo_depth: Option<usize>,
    /// Explicit config file
    pub config: Option<PathBuf>,
}

/// Everything a command needs, resolved once
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Workflow settings derived from the configuration
    pub settings: WorkflowSettings,
    /// The git runner
    pub runner: SystemGit,
}

impl Context {
    /// Load configuration and resolve where the repository is
    pub fn load(globals: &GlobalOptions) -> Result<Self> {
        let config = Config::load(globals.config.as_deref())?;

        let location = match &globals.repo {
            Some(path) => RepoLocation::Explicit(path.clone()),
            None => RepoLocation::Relative {
                from: std::env::current_dir()?,
                levels_up: globals.repo_depth.unwrap_or(config.repo_depth),
            },
        };
        let settings = config.workflow_settings(location)?;

        let mut runner = SystemGit::new();
        if let Some(limit) = config.git_timeout() {
            runner = runner.with_timeout(limit);
        }

        Ok(Self {
            config,
            settings,
            runner,
        })
    }
}
