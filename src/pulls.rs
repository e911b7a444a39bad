use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    choices::{choices_from, sort_choices},
    error::ReleaseError,
    prompt::Prompt,
    types::{Forge, PullRequest, RepoId},
};

/// Fetches all open pull requests of `repo`, keyed by their picker label.
///
/// Pages are requested one at a time from page 0 until an empty page comes
/// back.
pub async fn fetch_open_pull_requests<F>(
    forge: &F,
    repo: &RepoId,
) -> Result<HashMap<String, PullRequest>>
where
    F: Forge + Sync,
{
    let mut lookup = HashMap::new();
    let mut page = 0;

    loop {
        let partial = forge
            .list_open_pull_requests(repo, page)
            .await
            .with_context(|| format!("Failed to list open pull requests of {repo}"))?;
        if partial.is_empty() {
            break;
        }
        debug!(%repo, page, count = partial.len(), "Fetched pull request page");
        for pr in partial {
            lookup.insert(pr.display_label(), pr);
        }
        page += 1;
    }

    Ok(lookup)
}

/// Lets the user choose one of the open pull requests of `repo`.
///
/// When `number` is given that pull request is taken without prompting.
pub async fn select_pull_request<F, P>(
    forge: &F,
    prompt: &P,
    repo: &RepoId,
    number: Option<u64>,
) -> Result<PullRequest>
where
    F: Forge + Sync,
    P: Prompt + ?Sized,
{
    let mut lookup = fetch_open_pull_requests(forge, repo).await?;
    if lookup.is_empty() {
        anyhow::bail!("{repo} has no open pull requests");
    }

    if let Some(number) = number {
        return lookup
            .into_values()
            .find(|pr| pr.number == number)
            .ok_or_else(|| ReleaseError::NotFound(format!("#{number}")).into());
    }

    let items = sort_choices(&choices_from(lookup.keys().cloned()), &[], "", "");
    let selected = prompt.select("Select pull request", &items, None).await?;

    lookup
        .remove(&selected)
        .ok_or_else(|| ReleaseError::NotFound(selected).into())
}
