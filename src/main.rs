//! ctmd - contribute TMDB metadata to media-saber-ctmd
//!
//! CLI binary for fetching TMDB records and submitting them as pull requests.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ctmd_tool::tmdb::MediaKind;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "ctmd")]
#[command(about = "Fetch TMDB metadata and contribute it to media-saber-ctmd")]
#[command(version)]
struct Cli {
    /// Path to the repository root (overrides --repo-depth)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    /// Parent directories between the current directory and the repository root
    #[arg(long, global = true, value_name = "N")]
    repo_depth: Option<usize>,

    /// Config file (defaults to $CTMD_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the canonical upstream into the local clone
    Sync,

    /// Fetch one TMDB record into tmdb_config/
    Fetch {
        /// Media type (movie or tv)
        kind: MediaKind,
        /// TMDB ID
        id: String,
    },

    /// Commit tmdb_config/ changes and push them for review
    Submit(SubmitArgs),

    /// Fetch a record and submit it in one go
    Contribute {
        /// Media type (movie or tv)
        kind: MediaKind,
        /// TMDB ID
        id: String,
        /// Sync with upstream before fetching
        #[arg(long)]
        sync: bool,
        #[command(flatten)]
        submit: SubmitArgs,
    },
}

#[derive(Args)]
struct SubmitArgs {
    /// Commit on a new branch, optionally naming it
    #[arg(
        long,
        value_name = "NAME",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "existing"
    )]
    new_branch: Option<String>,

    /// Commit on the current branch
    #[arg(long)]
    existing: bool,

    /// Commit message
    #[arg(short, long)]
    message: Option<String>,

    /// Answer yes to confirmations
    #[arg(short = 'y', long)]
    yes: bool,

    /// Open the pull request page in a browser afterwards
    #[arg(long)]
    open: bool,
}

impl From<SubmitArgs> for cli::SubmitFlags {
    fn from(args: SubmitArgs) -> Self {
        Self {
            new_branch: args.new_branch,
            existing: args.existing,
            message: args.message,
            yes: args.yes,
            open: args.open,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ctmd=debug,ctmd_tool=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let globals = cli::GlobalOptions {
        repo: cli.repo,
        repo_depth: cli.repo_depth,
        config: cli.config,
    };
    let ctx = cli::Context::load(&globals)?;

    let result = match cli.command {
        None => {
            // Default: interactive mode
            cli::run_menu(&ctx).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Sync) => cli::run_sync(&ctx, &cli::CliProgress::verbose()).await,
        Some(Commands::Fetch { kind, id }) => {
            cli::run_fetch(&ctx, kind, &id).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Submit(args)) => {
            cli::run_submit(&ctx, &args.into(), &cli::CliProgress::verbose()).await
        }
        Some(Commands::Contribute {
            kind,
            id,
            sync,
            submit,
        }) => cli::run_contribute(&ctx, kind, &id, sync, &submit.into()).await?,
    };

    Ok(if result.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
