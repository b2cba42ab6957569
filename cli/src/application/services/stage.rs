//! Application service — file staging and the manifest's install step.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::{DependencyMap, InstallError, SystemIdentity};

/// Copy the extracted release into a fresh `target` and hand it to `owner`.
///
/// # Errors
///
/// Returns [`InstallError::TargetExists`] before touching anything if `target`
/// already exists, or an error if creating, copying or chowning fails.
pub fn stage_files(
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    source: &Path,
    target: &Path,
    owner: SystemIdentity,
) -> Result<()> {
    if local_fs.exists(target) {
        return Err(InstallError::TargetExists(target.to_path_buf()).into());
    }

    local_fs.create_dir_all(target)?;
    reporter.step(&format!(
        "Installing at the target directory: {}",
        target.display()
    ));
    local_fs
        .copy_tree(source, target)
        .context("copying release files")?;
    local_fs
        .chown_tree(target, owner)
        .context("changing ownership of staged files")?;
    Ok(())
}

/// Run the manifest's install step inside `target`.
///
/// An empty step is a no-op. Files the step creates are handed to `owner`
/// afterwards.
///
/// # Errors
///
/// Returns [`InstallError::InstallStepFailed`] with the step as written in the
/// manifest if it cannot be launched or exits non-zero.
pub async fn run_install_step(
    runner: &impl CommandRunner,
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    deps: &DependencyMap,
    install_step: &[String],
    target: &Path,
    owner: SystemIdentity,
) -> Result<()> {
    let Some(command) = deps.resolve_command(install_step) else {
        tracing::debug!("manifest has no install step");
        return Ok(());
    };

    let original = install_step.join(" ");
    reporter.step(&format!("running install step '{original}'..."));
    let args: Vec<&str> = command.args.iter().map(String::as_str).collect();
    let status = runner
        .run_status_in(target, &command.program, &args)
        .await;

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => {
            tracing::debug!(%status, "install step exited unsuccessfully");
            return Err(InstallError::InstallStepFailed(original).into());
        }
        Err(e) => {
            tracing::debug!(error = %e, "install step could not be launched");
            return Err(InstallError::InstallStepFailed(original).into());
        }
    }

    local_fs
        .chown_tree(target, owner)
        .context("changing ownership of install step output")?;
    reporter.success("install step finished");
    Ok(())
}
