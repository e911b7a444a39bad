//! Release-pull-request: draft a GitHub release from an open pull request.
//!
//! Picks a repository (remembering recent choices) and one of its open pull
//! requests, derives the next tag from the latest release, lifts the pull
//! request's Summary section into the release notes, creates a draft
//! release and opens it for editing.

pub mod choices;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod github;
pub mod notes;
pub mod opener;
pub mod prompt;
pub mod pulls;
pub mod release;
pub mod repos;
pub mod tag;
pub mod token;
pub mod types;

pub use choices::sort_choices;
pub use cli::{RunOptions, parse_args};
pub use config::{Config, ConfigStore, merge};
pub use env::{Environment, FixedEnvironment, SystemEnvironment};
pub use error::{NO_TOKEN_EXIT_CODE, ReleaseError};
pub use github::GitHub;
pub use notes::extract_release_notes;
pub use opener::{Opener, SystemOpener};
pub use prompt::{Prompt, TerminalPrompt};
pub use pulls::select_pull_request;
pub use release::{DraftedRelease, draft_release};
pub use repos::list_user_repos;
pub use tag::next_tag;
pub use token::{resolve_token, token_instructions};
pub use types::{Choice, ChoiceItem, Forge, NewRelease, PullRequest, Release, RepoId, Repository};
