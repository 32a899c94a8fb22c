//! TMDB metadata fetching
//!
//! Fetches a movie or TV record and writes it into the repository's
//! `tmdb_config/` tree. Records that already exist are never overwritten,
//! since contributors maintain them by hand after the first fetch.

mod client;
mod store;

pub use client::{DEFAULT_BASE_URL, TmdbClient};
pub use store::MetadataStore;

use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Kind of TMDB record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// `/movie/{id}`
    Movie,
    /// `/tv/{id}`
    Tv,
}

impl MediaKind {
    /// API path segment, also the directory name under `tmdb_config/`
    pub const fn path(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Sub-resources appended to the details call
    pub const fn appended_responses(self) -> &'static str {
        match self {
            Self::Movie => "credits,alternative_titles,translations,external_ids",
            Self::Tv => "credits,alternative_titles,translations,external_ids,aggregate_credits",
        }
    }

    /// Endpoint holding age ratings
    pub const fn ratings_endpoint(self) -> &'static str {
        match self {
            Self::Movie => "release_dates",
            Self::Tv => "content_ratings",
        }
    }

    /// File names written for one record: details, then ratings
    pub const fn file_names(self) -> [&'static str; 2] {
        match self {
            Self::Movie => ["details.json", "release_dates.json"],
            Self::Tv => ["details.json", "content_ratings.json"],
        }
    }

    /// Human-facing label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "TV show",
        }
    }

    fn title_of(self, details: &Value) -> Option<String> {
        let keys = match self {
            Self::Movie => ["title", "original_title"],
            Self::Tv => ["name", "original_name"],
        };
        keys.iter()
            .find_map(|k| details.get(*k).and_then(Value::as_str))
            .map(ToString::to_string)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "m" | "1" => Ok(Self::Movie),
            "tv" | "t" | "2" => Ok(Self::Tv),
            other => Err(Error::Parse(format!("unknown media type '{other}' (use movie or tv)"))),
        }
    }
}

/// Check a TMDB id is a positive integer written in plain digits
pub fn validate_media_id(id: &str) -> Result<&str> {
    let id = id.trim();
    let digits = !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit());
    if !digits || id.bytes().all(|b| b == b'0') {
        return Err(Error::InvalidMediaId(id.to_string()));
    }
    Ok(id)
}

/// Result of [`fetch_and_save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Both payloads were written
    Saved {
        /// Record directory
        dir: PathBuf,
        /// Display title, if TMDB returned one
        title: Option<String>,
    },
    /// The record directory already existed; nothing was fetched
    AlreadyExists {
        /// Record directory
        dir: PathBuf,
    },
}

/// Fetch details and ratings for one record and save them
pub async fn fetch_and_save(
    client: &TmdbClient,
    store: &MetadataStore,
    kind: MediaKind,
    id: &str,
) -> Result<FetchOutcome> {
    let id = validate_media_id(id)?;
    let dir = store.record_dir(kind, id);

    if store.exists(kind, id) {
        warn!("{} already exists, refusing to overwrite", dir.display());
        return Ok(FetchOutcome::AlreadyExists { dir });
    }

    info!("Fetching {} {id}", kind.label());
    let [details_file, ratings_file] = kind.file_names();

    // Nothing touches disk until both payloads are in hand
    let details = client.details(kind, id).await?;
    let ratings = client.ratings(kind, id).await?;
    store.save_record(kind, id, &[(details_file, &details), (ratings_file, &ratings)])?;

    Ok(FetchOutcome::Saved {
        title: kind.title_of(&details),
        dir,
    })
}
