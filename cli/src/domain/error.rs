//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Install errors ────────────────────────────────────────────────────────────

/// Fatal failures of the install pipeline stages.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("directory {} already exists, aborting", .0.display())]
    TargetExists(PathBuf),

    #[error("failed to create user '{name}': useradd {status}")]
    UserCreation { name: String, status: String },

    #[error("user '{0}' still does not exist after useradd")]
    UserMissing(String),

    #[error("install step '{0}' failed, aborting")]
    InstallStepFailed(String),
}

// ── Layout errors ─────────────────────────────────────────────────────────────

/// Errors in the host name or configured directory layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(
        "Invalid host '{0}': must match ^[a-z_][a-z0-9_.-]*$ and be at most 32 characters"
    )]
    InvalidHost(String),

    #[error("paths.{key} must be an absolute path, got '{}'", .path.display())]
    RelativePath { key: &'static str, path: PathBuf },
}

// ── Environment errors ────────────────────────────────────────────────────────

/// Errors raised when the supplied `--app-env` values do not satisfy the manifest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("invalid app env '{0}': expected KEY=VALUE")]
    Malformed(String),

    #[error("missing required app env: {}", .0.join(", "))]
    Missing(Vec<String>),
}

// ── Release errors ────────────────────────────────────────────────────────────

/// Errors raised while fetching and unpacking a release.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReleaseError {
    #[error("Expected exactly one release asset, found {0}")]
    AssetCount(usize),

    #[error("Release {0} not found")]
    NotFound(String),

    #[error("checksum mismatch for {asset}: expected {expected}, got {actual}")]
    DigestMismatch {
        asset: String,
        expected: String,
        actual: String,
    },

    #[error("release archive does not contain {0}")]
    MissingManifest(String),
}
