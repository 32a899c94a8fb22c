//! Terminal prompts backed by dialoguer
//!
//! Command-line flags pre-answer questions; anything not pre-answered is
//! asked interactively.

use ctmd_tool::error::Result;
use ctmd_tool::prompt::Prompter;
use ctmd_tool::types::SubmissionMode;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

/// Answers supplied up front on the command line
#[derive(Debug, Clone, Default)]
pub struct Presets {
    /// Answer yes to every confirmation
    pub assume_yes: bool,
    /// Submission mode
    pub mode: Option<SubmissionMode>,
    /// Branch name for a new branch (empty means the default)
    pub branch_name: Option<String>,
    /// Commit message
    pub commit_message: Option<String>,
}

/// [`Prompter`] that reads from the terminal
#[derive(Default)]
pub struct DialoguerPrompter {
    presets: Presets,
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    /// Ask everything interactively
    pub fn interactive() -> Self {
        Self::default()
    }

    /// Use `presets` where given, ask for the rest
    pub fn with_presets(presets: Presets) -> Self {
        Self {
            presets,
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        if self.presets.assume_yes {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(default)
            .interact()?)
    }

    fn choose_mode(&self) -> Result<SubmissionMode> {
        if let Some(mode) = self.presets.mode {
            return Ok(mode);
        }
        let modes = [SubmissionMode::NewBranch, SubmissionMode::ExistingBranch];
        let labels = [
            "Create a new branch (recommended)",
            "Commit to the current branch",
        ];
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Where should the commit go?")
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(modes[choice])
    }

    fn request_branch_name(&self, default: &str) -> Result<String> {
        if let Some(name) = &self.presets.branch_name {
            return Ok(name.clone());
        }
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("Branch name (blank for '{default}')"))
            .allow_empty(true)
            .interact_text()?)
    }

    fn request_commit_message(&self, default: &str) -> Result<String> {
        if let Some(message) = &self.presets.commit_message {
            return Ok(message.clone());
        }
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("Commit message (blank for '{default}')"))
            .allow_empty(true)
            .interact_text()?)
    }
}
