//! Shared CLI progress callback with styled output

use crate::cli::style::{Stylize, warning};
use anstream::{eprintln, println};
use async_trait::async_trait;
use ctmd_tool::progress::{Phase, ProgressCallback};
use ctmd_tool::types::ChangeSet;

const MAX_LISTED_CHANGES: usize = 20;

/// CLI progress callback that prints to stdout with styled output
///
/// Two modes:
/// - verbose (standalone commands): every phase, full change list
/// - compact (contribute): only network phases, indented under the step
pub struct CliProgress {
    /// Verbose mode shows all phases and detailed output
    pub verbose: bool,
}

impl CliProgress {
    /// Progress for a standalone sync or submit
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Progress nested under a larger command
    pub const fn compact() -> Self {
        Self { verbose: false }
    }

    const fn indent(&self) -> &'static str {
        if self.verbose { "" } else { "  " }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        if self.verbose {
            if phase != Phase::Complete {
                println!("{}...", phase.to_string().emphasis());
            }
        } else if matches!(phase, Phase::Fetching | Phase::Pulling | Phase::Pushing) {
            println!("  {}...", phase.to_string().muted());
        }
    }

    async fn on_changes(&self, changes: &ChangeSet) {
        let indent = self.indent();
        println!(
            "{indent}{} changed path{}:",
            changes.len().accent(),
            if changes.len() == 1 { "" } else { "s" }
        );
        let limit = if self.verbose {
            changes.len()
        } else {
            MAX_LISTED_CHANGES
        };
        for entry in changes.entries.iter().take(limit) {
            println!("{indent}  {} {}", entry.status.muted(), entry.path.accent());
        }
        if changes.len() > limit {
            println!(
                "{indent}  {}",
                format!("... and {} more", changes.len() - limit).muted()
            );
        }
    }

    async fn on_warning(&self, message: &str) {
        eprintln!("{}{} {}", self.indent(), warning(), message.warn());
    }

    async fn on_message(&self, message: &str) {
        if self.verbose {
            println!("  {message}");
        } else {
            println!("  {}", message.muted());
        }
    }
}
