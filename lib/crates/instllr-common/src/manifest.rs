// lib/crates/instllr-common/src/manifest.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the manifest bundled at the root of every release archive.
pub const MANIFEST_FILE: &str = "instllr.yaml";

/// Errors raised when a manifest is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("manifest 'run' must contain at least one token")]
    EmptyRun,

    #[error("manifest '{field}' contains an empty token")]
    EmptyToken { field: &'static str },
}

/// Release manifest (`instllr.yaml`).
///
/// ```yaml
/// run: [node, server.js]
/// install: [npm, ci, --omit=dev]
/// require: [node, npm]
/// env: [DATABASE_URL]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Command the supervised process runs; first token is the executable.
    pub run: Vec<String>,
    /// Command executed once inside the staged directory. May be empty.
    #[serde(default, rename = "install")]
    pub install_step: Vec<String>,
    /// Command names the application depends on.
    #[serde(default)]
    pub require: Vec<String>,
    /// Environment variable names the application needs at runtime.
    #[serde(default)]
    pub env: Vec<String>,
}

impl Manifest {
    /// Checks the structural invariants the installer relies on.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.run.is_empty() {
            return Err(ManifestError::EmptyRun);
        }
        for (field, tokens) in [
            ("run", &self.run),
            ("install", &self.install_step),
            ("require", &self.require),
            ("env", &self.env),
        ] {
            if tokens.iter().any(String::is_empty) {
                return Err(ManifestError::EmptyToken { field });
            }
        }
        Ok(())
    }

    /// Every command name the manifest references: `require` plus the
    /// executables of `run` and `install`, deduplicated and sorted.
    #[must_use]
    pub fn dependency_names(&self) -> BTreeSet<&str> {
        self.require
            .iter()
            .chain(self.run.first())
            .chain(self.install_step.first())
            .map(String::as_str)
            .collect()
    }
}
