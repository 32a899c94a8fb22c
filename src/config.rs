//! Config loading
//!
//! A single JSON file, compatible with the `config.json` contributors
//! already keep for the TMDB scripts, plus a few workflow settings.

use crate::error::{Error, Result};
use crate::platform::parse_repo_info;
use crate::repo::{DEFAULT_MAX_ATTEMPTS, RepoLocation};
use crate::submit::SubmitOptions;
use crate::types::{ProjectIdentity, RemoteRef};
use crate::workflow::WorkflowSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "CTMD_CONFIG";

/// Environment variable overriding the TMDB API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

const API_KEY_PLACEHOLDER: &str = "your_tmdb_api_key_here";

/// HTTP proxy for TMDB requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Whether to route requests through `url`
    pub enabled: bool,
    /// Proxy URL (e.g., `http://127.0.0.1:7890`)
    pub url: String,
}

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// Response language for TMDB
    pub language: String,
    /// Optional proxy
    pub proxy: ProxyConfig,
    /// Parent directories between the invocation directory and the repository root
    pub repo_depth: usize,
    /// Canonical repository, registered as `upstream`
    pub upstream_url: String,
    /// Per-invocation limit for git commands (0 disables)
    pub git_timeout_secs: u64,
    /// Suffixes tried when deriving a free branch name
    pub max_branch_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            language: "zh-CN".to_string(),
            proxy: ProxyConfig::default(),
            repo_depth: 1,
            upstream_url: ProjectIdentity::default().clone_url(),
            git_timeout_secs: 300,
            max_branch_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/ctmd/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ctmd").join("config.json"))
    }

    /// Load from `explicit`, `$CTMD_CONFIG`, or the default path
    ///
    /// An explicitly named file must exist; a missing default file yields
    /// defaults. `TMDB_API_KEY` overrides the file either way.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid {}: {e}", path.display())))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.tmdb_api_key = Some(key);
        }
        self
    }

    /// The TMDB API key, if one is really set
    pub fn api_key(&self) -> Result<&str> {
        match self.tmdb_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
            _ => Err(Error::Config(format!(
                "TMDB API key not set - add tmdb_api_key to the config file or set {API_KEY_ENV}"
            ))),
        }
    }

    /// Proxy URL when enabled
    pub fn proxy_url(&self) -> Option<&str> {
        (self.proxy.enabled && !self.proxy.url.trim().is_empty()).then_some(self.proxy.url.trim())
    }

    /// Git timeout, `None` when disabled
    pub const fn git_timeout(&self) -> Option<Duration> {
        if self.git_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.git_timeout_secs))
        }
    }

    /// Build workflow settings for a repository location
    pub fn workflow_settings(&self, location: RepoLocation) -> Result<WorkflowSettings> {
        let project = parse_repo_info(&self.upstream_url)?;
        Ok(WorkflowSettings {
            location,
            upstream: RemoteRef {
                name: "upstream".to_string(),
                url: self.upstream_url.clone(),
            },
            submit: SubmitOptions {
                max_name_attempts: self.max_branch_attempts,
                project,
                ..SubmitOptions::default()
            },
        })
    }
}
