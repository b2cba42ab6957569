//! Application service — system account provisioning.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter, UserDatabase};
use crate::domain::{InstallError, SystemIdentity};

/// Ensure a system account named `name` exists and return its uid/gid.
///
/// An existing account is reused unchanged. Otherwise `useradd -mrU` creates a
/// system account with a home directory and a private group of the same name.
///
/// # Errors
///
/// Returns an error if `useradd` cannot be launched, exits non-zero, or the
/// account is still missing afterwards.
pub async fn ensure_user(
    runner: &impl CommandRunner,
    users: &impl UserDatabase,
    reporter: &impl ProgressReporter,
    name: &str,
) -> Result<SystemIdentity> {
    if let Some(identity) = users.lookup(name)? {
        reporter.step(&format!("user '{name}' already exists"));
        return Ok(identity);
    }

    reporter.step(&format!("creating user '{name}'..."));
    let status = runner
        .run_status("useradd", &["-mrU", name])
        .await
        .context("running useradd")?;
    if !status.success() {
        return Err(InstallError::UserCreation {
            name: name.to_string(),
            status: status.to_string(),
        }
        .into());
    }

    let identity = users
        .lookup(name)?
        .ok_or_else(|| InstallError::UserMissing(name.to_string()))?;
    reporter.success(&format!("created user '{name}' ({identity})"));
    Ok(identity)
}
