//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::Result;

use crate::domain::{InstllrConfig, ReleaseAsset, ReleaseInfo, SystemIdentity};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Both methods inherit the installer's stdout/stderr and wait for the child
/// without a timeout.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and return its exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;

    /// Run a program with `dir` as its working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn run_status_in(&self, dir: &Path, program: &str, args: &[&str])
    -> Result<ExitStatus>;
}

// ── Account Port ──────────────────────────────────────────────────────────────

/// Read access to the host user database.
pub trait UserDatabase {
    /// Look up an account by name, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the user database cannot be read.
    fn lookup(&self, name: &str) -> Result<Option<SystemIdentity>>;
}

// ── Dependency Port ───────────────────────────────────────────────────────────

/// Resolves bare command names against the executable search path.
pub trait PathResolver {
    /// Absolute path of `name`, or `None` when it cannot be found.
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the host filesystem operations the installer performs.
pub trait LocalFs {
    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Returns `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// Create `path` and all missing parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Recursively copy the contents of `src` into the existing directory `dst`.
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()>;
    /// Recursively change ownership of `path` and everything below it.
    fn chown_tree(&self, path: &Path, owner: SystemIdentity) -> Result<()>;
    /// Create or truncate `path` with `content`.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Read `path` as UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// Unpack a gzip-compressed tarball into `dest`.
    fn unpack_tar_gz(&self, archive: &Path, dest: &Path) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Loads installer configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<InstllrConfig>;
    /// Location of the configuration file.
    fn path(&self) -> PathBuf;
}

// ── Release Source Port ───────────────────────────────────────────────────────

/// Remote source of published releases.
pub trait ReleaseSource {
    /// Fetch release metadata; `tag == "latest"` selects the newest release.
    ///
    /// # Errors
    ///
    /// Returns an error if the release does not exist or the API is unreachable.
    fn release(&self, owner: &str, repo: &str, tag: &str) -> Result<ReleaseInfo>;

    /// Download `asset` into `dir`, returning the written file.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or its checksum does not match.
    fn download(&self, asset: &ReleaseAsset, dir: &Path) -> Result<PathBuf>;
}
