//! Persisted selection history.
//!
//! The document lives at `~/.release-pull-request` and looks like
//! `{ "repoHistory": ["owner/repo", ...] }`, most recent first. Missing
//! files and missing keys fall back to defaults; keys this tool does not
//! know about are carried through on update.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::{env::Environment, error::ReleaseError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub repo_history: Vec<String>,
}

impl Config {
    fn default_document() -> Map<String, Value> {
        let mut document = Map::new();
        document.insert("repoHistory".to_string(), Value::Array(Vec::new()));
        document
    }
}

/// Merges `source` into `target` and returns `target`.
///
/// Arrays in `target` receive the elements of the matching `source` array
/// at the front, in `source` order. Any other value is replaced by the one
/// from `source`.
pub fn merge<'a>(
    target: &'a mut Map<String, Value>,
    source: Option<&Map<String, Value>>,
) -> &'a mut Map<String, Value> {
    let Some(source) = source else {
        return target;
    };

    for (key, value) in source {
        if let (Some(Value::Array(existing)), Value::Array(incoming)) = (target.get_mut(key), value)
        {
            existing.splice(0..0, incoming.iter().cloned());
            continue;
        }
        target.insert(key.clone(), value.clone());
    }

    target
}

/// Loads and updates the history document at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Option<PathBuf>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn from_environment(env: &dyn Environment) -> Self {
        Self {
            path: env.config_path(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn load(&self) -> Result<Config> {
        let mut document = Config::default_document();
        merge(&mut document, self.read_document().await?.as_ref());
        self.decode(document)
    }

    /// Merges `update` over the stored document and writes it back.
    pub async fn update(&self, update: Map<String, Value>) -> Result<Config> {
        let Some(path) = &self.path else {
            warn!("No home directory available, selection history will not be saved");
            return self.decode(update);
        };

        let mut document = Config::default_document();
        merge(&mut document, self.read_document().await?.as_ref());
        merge(&mut document, Some(&update));

        let contents = serde_json::to_string_pretty(&document)
            .context("Failed to serialise selection history")?;
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        debug!(path = %path.display(), "Saved selection history");

        self.decode(document)
    }

    /// Puts `repo` at the front of the repository history.
    pub async fn record_repo(&self, repo: &str) -> Result<Config> {
        let mut update = Map::new();
        update.insert("repoHistory".to_string(), json!([repo]));
        self.update(update).await
    }

    async fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file yet");
                return Ok(None);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read config file {}", path.display()));
            }
        };

        match serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?
        {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(ReleaseError::InvalidConfig(path.display().to_string()).into()),
        }
    }

    fn decode(&self, document: Map<String, Value>) -> Result<Config> {
        serde_json::from_value(Value::Object(document)).with_context(|| match &self.path {
            Some(path) => format!("Unexpected config contents in {}", path.display()),
            None => "Unexpected config contents".to_string(),
        })
    }
}
