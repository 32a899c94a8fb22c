//! Fetch command - download one TMDB record into tmdb_config/

use crate::cli::style::{Stylize, check, spinner_style, warning};
use crate::cli::Context;
use anstream::{eprintln, println};
use ctmd_tool::error::Result;
use ctmd_tool::repo::RepositoryHandle;
use ctmd_tool::tmdb::{FetchOutcome, MediaKind, MetadataStore, TmdbClient, fetch_and_save};
use indicatif::ProgressBar;
use std::time::Duration;

/// Store rooted at the repository's output directory
pub fn metadata_store(ctx: &Context) -> Result<MetadataStore> {
    let repo = RepositoryHandle::discover(&ctx.settings.location)?;
    let dir = ctx.settings.submit.output_dir.trim_end_matches('/');
    Ok(MetadataStore::new(repo.root().join(dir)))
}

/// Run the fetch command
pub async fn run_fetch(ctx: &Context, kind: MediaKind, id: &str) -> Result<FetchOutcome> {
    let store = metadata_store(ctx)?;
    let client = TmdbClient::from_config(&ctx.config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching {} {id} from TMDB", kind.label()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = fetch_and_save(&client, &store, kind, id).await;
    spinner.finish_and_clear();

    let outcome = outcome?;
    print_outcome(kind, &outcome);
    Ok(outcome)
}

fn print_outcome(kind: MediaKind, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Saved { dir, title } => {
            println!("{} Saved {} metadata", check(), kind.label());
            println!(
                "  Title: {}",
                title.as_deref().unwrap_or("N/A").emphasis()
            );
            println!("  Directory: {}", dir.display().accent());
        }
        FetchOutcome::AlreadyExists { dir } => {
            eprintln!(
                "{} {} already exists; not overwriting maintained metadata",
                warning(),
                dir.display().to_string().warn()
            );
            eprintln!("  Delete the directory first to fetch it again");
        }
    }
}
