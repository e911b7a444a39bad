//! End-to-end drafting: repository, pull request, tag, notes, release.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    choices::{choices_from, sort_choices},
    cli::RunOptions,
    config::ConfigStore,
    error::ReleaseError,
    notes::extract_release_notes,
    opener::Opener,
    prompt::Prompt,
    pulls::select_pull_request,
    repos::list_user_repos,
    tag::next_tag,
    types::{Forge, NewRelease, PullRequest, Release, RepoId},
};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftedRelease {
    pub repo: RepoId,
    pub pull_request: PullRequest,
    pub release: Release,
    pub edit_url: String,
}

/// Repository named on the command line, if it is fully specified.
///
/// `--repo owner/name` stands on its own; a bare `--repo name` needs
/// `--owner`.
pub fn repo_from_options(opts: &RunOptions) -> Result<Option<RepoId>, ReleaseError> {
    let Some(repo) = &opts.repo else {
        return Ok(None);
    };

    if repo.contains('/') {
        return RepoId::parse(repo).map(Some);
    }

    match &opts.owner {
        Some(owner) => RepoId::new(owner.as_str(), repo.as_str()).map(Some),
        None => Err(ReleaseError::MissingOwner(repo.clone())),
    }
}

/// Resolves the repository to release from, prompting when the options do
/// not name one.
///
/// An interactive choice is recorded at the front of the repository
/// history.
pub async fn select_repo<F, P>(
    opts: &RunOptions,
    forge: &F,
    prompt: &P,
    config: &ConfigStore,
) -> Result<RepoId>
where
    F: Forge + Sync,
    P: Prompt + ?Sized,
{
    if let Some(repo) = repo_from_options(opts)? {
        return Ok(repo);
    }

    info!("listing available repositories...");
    let mut repos = list_user_repos(forge).await?;
    if let Some(owner) = &opts.owner {
        let prefix = format!("{owner}/");
        repos.retain(|repo| repo.starts_with(&prefix));
    }
    if repos.is_empty() {
        anyhow::bail!("No repositories available to choose from");
    }

    let config_data = config.load().await?;
    let default = config_data
        .repo_history
        .iter()
        .find(|entry| repos.contains(entry))
        .map(String::as_str);
    let items = sort_choices(
        &choices_from(repos.iter()),
        &config_data.repo_history,
        "Recent repos:",
        "Other repos:",
    );
    let selected = prompt.select("Select repository", &items, default).await?;
    let repo = RepoId::parse(&selected)?;

    if let Err(err) = config.record_repo(&selected).await {
        warn!(error = %err, "Could not save repository history");
    }

    Ok(repo)
}

/// Builds the create-release payload for `pr`, following the latest
/// release.
pub fn build_release(
    opts: &RunOptions,
    repo: &RepoId,
    pr: &PullRequest,
    latest: Option<&Release>,
) -> Result<NewRelease, ReleaseError> {
    let tag_name = match &opts.tag {
        Some(tag) => tag.clone(),
        None => next_tag(latest)?,
    };
    let body = match &opts.body {
        Some(body) => body.clone(),
        None => extract_release_notes(pr.body.as_deref().unwrap_or("")),
    };

    Ok(NewRelease {
        repo: repo.clone(),
        tag_name,
        name: opts.name.clone().unwrap_or_else(|| pr.title.clone()),
        body,
        draft: true,
        target_commitish: pr.head_ref.clone(),
    })
}

/// Runs the whole flow with an already authenticated forge.
pub async fn draft_release<F, P, O>(
    opts: &RunOptions,
    forge: &F,
    prompt: &P,
    opener: &O,
    config: &ConfigStore,
) -> Result<DraftedRelease>
where
    F: Forge + Sync,
    P: Prompt + ?Sized,
    O: Opener + ?Sized,
{
    let repo = select_repo(opts, forge, prompt, config).await?;
    let pull_request = select_pull_request(forge, prompt, &repo, opts.pull).await?;

    let releases = forge.list_releases(&repo).await?;
    let new_release = build_release(opts, &repo, &pull_request, releases.first())?;
    info!(
        %repo,
        tag = %new_release.tag_name,
        target = %new_release.target_commitish,
        "Creating draft release"
    );

    let release = forge.create_release(&new_release).await?;
    let edit_url = release.edit_url();

    opener
        .open(&edit_url)
        .await
        .with_context(|| format!("Failed to open {edit_url}"))?;
    if opts.open_pr {
        opener
            .open(&pull_request.html_url)
            .await
            .with_context(|| format!("Failed to open {}", pull_request.html_url))?;
    }

    Ok(DraftedRelease {
        repo,
        pull_request,
        release,
        edit_url,
    })
}
