//! ctmd-tool - contribute TMDB metadata to media-saber-ctmd
//!
//! Fetches movie and TV metadata from TMDB into a local clone of the
//! `media-saber-ctmd` repository, keeps that clone in sync with the
//! canonical upstream, and turns fetched records into pushed branches
//! ready for a pull request.
//!
//! The git side is driven entirely through the [`repo::GitRunner`] and
//! [`prompt::Prompter`] seams, so every workflow can run against a fake
//! repository and scripted answers.

pub mod auth;
pub mod browser;
pub mod config;
pub mod error;
pub mod platform;
pub mod progress;
pub mod prompt;
pub mod repo;
pub mod submit;
pub mod sync;
pub mod tmdb;
pub mod types;
pub mod workflow;

pub use error::{Error, Result};
