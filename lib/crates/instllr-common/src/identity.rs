// lib/crates/instllr-common/src/identity.rs

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Tag used when the release argument carries no `:tag` suffix.
pub const DEFAULT_TAG: &str = "latest";

/// Errors produced while parsing an `owner/repo[:tag]` argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("at least one argument expected")]
    Empty,

    #[error("invalid argument: {0}")]
    Malformed(String),
}

/// A specific release of a repository: `(owner, repo, tag)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseIdentity {
    pub owner: String,
    pub repo: String,
    pub tag: String,
}

impl ReleaseIdentity {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            tag: tag.into(),
        }
    }

    /// Returns a copy of this identity pinned to `tag`.
    ///
    /// Used once the release source has resolved `latest` to a concrete tag.
    #[must_use]
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            tag: tag.into(),
        }
    }

    /// Staging directory leaf, `owner-repo-tag`.
    ///
    /// Always a single path component: a `/` in the tag (GitHub allows
    /// `release/v1`) becomes `-`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("{}-{}-{}", self.owner, self.repo, self.tag.replace('/', "-"))
    }
}

impl fmt::Display for ReleaseIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.owner, self.repo, self.tag)
    }
}

impl FromStr for ReleaseIdentity {
    type Err = IdentityError;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        if arg.is_empty() {
            return Err(IdentityError::Empty);
        }
        let malformed = || IdentityError::Malformed(arg.to_string());

        let mut tag_split = arg.split(':');
        let name = tag_split.next().unwrap_or_default();
        let tag = tag_split.next().unwrap_or(DEFAULT_TAG);
        if tag_split.next().is_some() {
            return Err(malformed());
        }

        let (owner, repo) = name.split_once('/').ok_or_else(malformed)?;
        if repo.contains('/') || owner.is_empty() || repo.is_empty() || tag.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(owner, repo, tag))
    }
}
