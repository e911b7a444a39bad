use std::fmt;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::ReleaseError;

/// A repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, ReleaseError> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
            return Err(ReleaseError::InvalidRepo(format!("{owner}/{name}")));
        }
        Ok(Self { owner, name })
    }

    /// Parses `owner/repo`, requiring exactly two non-empty parts.
    pub fn parse(value: &str) -> Result<Self, ReleaseError> {
        match value.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(ReleaseError::InvalidRepo(value.to_string())),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Snapshot of an open pull request.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author_login: Option<String>,
    pub body: Option<String>,
    pub head_ref: String,
    pub html_url: String,
}

impl PullRequest {
    /// Label shown in the pull request picker.
    pub fn display_label(&self) -> String {
        format!(
            "#{} [{}] :: {}",
            self.number,
            self.author_login.as_deref().unwrap_or(""),
            self.title
        )
    }
}

/// A release as returned by the forge.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub tag_name: String,
    pub draft: bool,
    pub target_commitish: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub html_url: String,
}

impl Release {
    /// Page where the release can be edited, derived from its public URL.
    pub fn edit_url(&self) -> String {
        self.html_url.replacen("/releases/tag/", "/releases/edit/", 1)
    }
}

/// Payload for creating a release.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRelease {
    pub repo: RepoId,
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub target_commitish: String,
}

/// A repository visible to the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// One selectable option in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
}

impl Choice {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: value.clone(),
            value,
            description: None,
            disabled: false,
        }
    }
}

/// An entry in a prompt's display list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceItem {
    Choice(Choice),
    /// Group heading; `None` draws a plain rule.
    Separator(Option<String>),
}

impl ChoiceItem {
    pub fn separator(label: impl Into<String>) -> Self {
        ChoiceItem::Separator(Some(label.into()))
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            ChoiceItem::Choice(choice) => Some(choice),
            ChoiceItem::Separator(_) => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, ChoiceItem::Separator(_))
    }
}

/// Remote forge operations needed to draft a release.
///
/// Page numbers are passed through unchanged; an empty page means there is
/// no more data.
#[async_trait]
pub trait Forge {
    async fn list_open_pull_requests(&self, repo: &RepoId, page: u32) -> Result<Vec<PullRequest>>;

    /// Releases of `repo`, most recent first.
    async fn list_releases(&self, repo: &RepoId) -> Result<Vec<Release>>;

    async fn create_release(&self, release: &NewRelease) -> Result<Release>;

    async fn list_user_repositories(&self, page: u32, per_page: u8) -> Result<Vec<Repository>>;
}
