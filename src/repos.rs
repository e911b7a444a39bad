use std::collections::HashSet;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use tracing::debug;

use crate::types::Forge;

pub const REPO_PAGE_SIZE: u8 = 100;

/// Number of repository pages requested concurrently per round.
pub const PAGES_PER_ROUND: u32 = 6;

/// Lists every repository visible to the authenticated user as `owner/name`.
///
/// Pages are fetched in rounds of [`PAGES_PER_ROUND`] concurrent requests.
/// A round containing an empty page is the last one. The result has no
/// duplicates; its order is not significant.
pub async fn list_user_repos<F>(forge: &F) -> Result<Vec<String>>
where
    F: Forge + Sync,
{
    let mut names = Vec::new();
    let mut first_page = 0;

    loop {
        let pages: Vec<u32> = (first_page..first_page + PAGES_PER_ROUND).collect();
        let round = try_join_all(
            pages
                .iter()
                .map(|&page| forge.list_user_repositories(page, REPO_PAGE_SIZE)),
        )
        .await
        .with_context(|| format!("Failed to list repositories (pages {:?})", pages))?;

        let exhausted = round.iter().any(Vec::is_empty);
        names.extend(round.into_iter().flatten().map(|repo| repo.full_name()));
        debug!(?pages, total = names.len(), exhausted, "Fetched repository round");

        if exhausted {
            break;
        }
        first_page = pages.last().map_or(first_page, |last| last + 1);
    }

    let mut seen = HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
    Ok(names)
}
