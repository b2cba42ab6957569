//! Application service — nginx site generation.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter};
use crate::domain::{ProxyDescriptor, nginx_site};

/// Prepare the log directory, check for certificates, then write the site.
///
/// A missing certificate directory only warns; certificates are requested
/// separately once the site is live.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the site file
/// cannot be written.
pub fn write_proxy(
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    proxy: &ProxyDescriptor,
    path: &Path,
) -> Result<()> {
    local_fs
        .create_dir_all(&proxy.log_dir)
        .context("creating proxy log directory")?;

    if !local_fs.is_dir(&proxy.cert_dir) {
        reporter.warn(&format!(
            "certs directory '{}' does not exist",
            proxy.cert_dir.display()
        ));
    }

    let content = nginx_site(proxy);
    local_fs
        .write(path, &content)
        .with_context(|| format!("writing proxy site {}", path.display()))?;
    reporter.success(&format!("proxy site written to {}", path.display()));
    Ok(())
}
