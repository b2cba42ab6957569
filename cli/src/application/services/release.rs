//! Application service — fetch, unpack and read a release.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use instllr_common::{MANIFEST_FILE, Manifest, ReleaseIdentity};

use crate::application::ports::{LocalFs, ProgressReporter, ReleaseSource};
use crate::domain::{ReleaseError, parse_manifest};

/// An extracted release ready to be installed.
#[derive(Debug, Clone)]
pub struct PreparedRelease {
    /// Identity with `latest` replaced by the release's actual tag.
    pub identity: ReleaseIdentity,
    pub manifest: Manifest,
    /// Directory holding the extracted files.
    pub dir: PathBuf,
}

/// Download the release's single asset into `workdir`, unpack it there,
/// delete the archive and load the manifest.
///
/// # Errors
///
/// Returns an error if the release cannot be found, has other than one
/// asset, fails to download or unpack, or carries no valid manifest.
pub fn fetch_release(
    source: &impl ReleaseSource,
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    requested: &ReleaseIdentity,
    workdir: &Path,
) -> Result<PreparedRelease> {
    let release = source.release(&requested.owner, &requested.repo, &requested.tag)?;
    let asset = release.single_asset()?;
    tracing::debug!(tag = %release.tag, asset = %asset.name, "release resolved");

    let archive = source.download(asset, workdir)?;
    reporter.step(&format!("Asset: {}", archive.display()));

    local_fs
        .unpack_tar_gz(&archive, workdir)
        .with_context(|| format!("unpacking {}", asset.name))?;
    local_fs.remove_file(&archive)?;

    let manifest_path = workdir.join(MANIFEST_FILE);
    if !local_fs.exists(&manifest_path) {
        return Err(ReleaseError::MissingManifest(MANIFEST_FILE.to_string()).into());
    }
    let manifest = parse_manifest(&local_fs.read_to_string(&manifest_path)?)
        .with_context(|| format!("loading {MANIFEST_FILE}"))?;

    Ok(PreparedRelease {
        identity: requested.with_tag(release.tag.clone()),
        manifest,
        dir: workdir.to_path_buf(),
    })
}
