//! Application service — systemd unit generation.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter};
use crate::domain::{UnitDescriptor, systemd_unit};

/// Render `unit` and write it to `path`, replacing any earlier unit.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_unit(
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    unit: &UnitDescriptor,
    path: &Path,
) -> Result<()> {
    let content = systemd_unit(unit);
    local_fs
        .write(path, &content)
        .with_context(|| format!("writing service unit {}", path.display()))?;
    reporter.success(&format!("service unit written to {}", path.display()));
    Ok(())
}
