use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::{Octocrab, models, params};

use crate::types::{Forge, NewRelease, PullRequest, Release, RepoId, Repository};

/// [`Forge`] backed by the GitHub REST API.
pub struct GitHub {
    client: Octocrab,
}

impl GitHub {
    /// Creates an authenticated client from a personal access token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .context("Failed to create GitHub client")?;
        Ok(Self { client })
    }
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub").finish_non_exhaustive()
    }
}

// The REST builders take small page numbers; beyond 255 pages something is
// wrong with the listing rather than the account.
fn page_number(page: u32) -> Result<u8> {
    u8::try_from(page).with_context(|| format!("Page number {page} is out of range"))
}

fn convert_pull_request(pr: models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author_login: pr.user.map(|user| user.login),
        body: pr.body,
        head_ref: pr.head.ref_field,
        html_url: pr.html_url.map(|url| url.to_string()).unwrap_or_default(),
    }
}

fn convert_release(release: models::repos::Release) -> Release {
    Release {
        tag_name: release.tag_name,
        draft: release.draft,
        target_commitish: release.target_commitish,
        name: release.name,
        body: release.body,
        html_url: release.html_url.to_string(),
    }
}

fn convert_repository(repo: models::Repository) -> Repository {
    let owner = match repo.owner {
        Some(owner) => owner.login,
        None => repo
            .full_name
            .as_deref()
            .and_then(|full| full.split_once('/'))
            .map(|(owner, _)| owner.to_string())
            .unwrap_or_default(),
    };
    Repository {
        owner,
        name: repo.name,
    }
}

#[async_trait]
impl Forge for GitHub {
    async fn list_open_pull_requests(&self, repo: &RepoId, page: u32) -> Result<Vec<PullRequest>> {
        let page = self
            .client
            .pulls(&repo.owner, &repo.name)
            .list()
            .state(params::State::Open)
            .page(page_number(page)?)
            .send()
            .await?;
        Ok(page.items.into_iter().map(convert_pull_request).collect())
    }

    async fn list_releases(&self, repo: &RepoId) -> Result<Vec<Release>> {
        let page = self
            .client
            .repos(&repo.owner, &repo.name)
            .releases()
            .list()
            .send()
            .await
            .with_context(|| format!("Failed to list releases of {repo}"))?;
        Ok(page.items.into_iter().map(convert_release).collect())
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release> {
        let created = self
            .client
            .repos(&release.repo.owner, &release.repo.name)
            .releases()
            .create(&release.tag_name)
            .target_commitish(&release.target_commitish)
            .name(&release.name)
            .body(&release.body)
            .draft(release.draft)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to create release {} in {}",
                    release.tag_name, release.repo
                )
            })?;
        Ok(convert_release(created))
    }

    async fn list_user_repositories(&self, page: u32, per_page: u8) -> Result<Vec<Repository>> {
        let page = self
            .client
            .current()
            .list_repos_for_authenticated_user()
            .per_page(per_page)
            .page(page_number(page)?)
            .send()
            .await?;
        Ok(page.items.into_iter().map(convert_repository).collect())
    }
}
