//! Interactive main menu (default when no subcommand is given)

use crate::cli::fetch::run_fetch;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, cross};
use crate::cli::{Context, SubmitFlags, run_submit, run_sync};
use anstream::{eprintln, println};
use ctmd_tool::error::Result;
use ctmd_tool::tmdb::{MediaKind, validate_media_id};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Sync,
    Fetch,
    Submit,
    Quit,
}

const ITEMS: [(MenuItem, &str); 4] = [
    (MenuItem::Sync, "Sync with upstream"),
    (MenuItem::Fetch, "Fetch TMDB metadata"),
    (MenuItem::Submit, "Submit changes"),
    (MenuItem::Quit, "Quit"),
];

/// Loop over the main menu until the user quits
pub async fn run_menu(ctx: &Context) -> Result<()> {
    let theme = ColorfulTheme::default();
    print_banner(ctx);

    loop {
        let labels: Vec<&str> = ITEMS.iter().map(|(_, label)| *label).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let item = choice.map_or(MenuItem::Quit, |i| ITEMS[i].0);
        match item {
            MenuItem::Sync => {
                run_sync(ctx, &CliProgress::verbose()).await;
            }
            MenuItem::Fetch => fetch_loop(ctx, &theme).await?,
            MenuItem::Submit => {
                run_submit(ctx, &SubmitFlags::default(), &CliProgress::verbose()).await;
            }
            MenuItem::Quit => {
                println!("{}", "Bye!".muted());
                return Ok(());
            }
        }
        println!();
    }
}

fn print_banner(ctx: &Context) {
    println!("{}", "ctmd - TMDB metadata contribution tool".emphasis());
    println!(
        "{}",
        format!("Upstream: {}", ctx.settings.upstream.url).muted()
    );
    println!();
}

/// Fetch records until the user is done, offering a retry after errors
async fn fetch_loop(ctx: &Context, theme: &ColorfulTheme) -> Result<()> {
    loop {
        let Some(kind) = ask_kind(theme)? else {
            return Ok(());
        };
        let id: String = Input::with_theme(theme)
            .with_prompt("TMDB ID")
            .validate_with(|input: &String| {
                validate_media_id(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;

        loop {
            match run_fetch(ctx, kind, &id).await {
                Ok(_) => break,
                Err(e) => {
                    eprintln!("{} {}", cross(), e.to_string().error());
                    let retry = Confirm::with_theme(theme)
                        .with_prompt("Retry?")
                        .default(true)
                        .interact()?;
                    if !retry {
                        break;
                    }
                }
            }
        }

        let again = Confirm::with_theme(theme)
            .with_prompt("Fetch another record?")
            .default(false)
            .interact()?;
        if !again {
            return Ok(());
        }
    }
}

fn ask_kind(theme: &ColorfulTheme) -> Result<Option<MediaKind>> {
    let kinds = [MediaKind::Movie, MediaKind::Tv];
    let choice = Select::with_theme(theme)
        .with_prompt("Media type")
        .items(&["Movie", "TV show"])
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| kinds[i]))
}
