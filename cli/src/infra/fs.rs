//! Filesystem infrastructure — implements the `LocalFs` port on the host.

use std::fs::File;
use std::os::unix::fs::{lchown, symlink};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use walkdir::WalkDir;

use crate::application::ports::LocalFs;
use crate::domain::SystemIdentity;

/// Production filesystem implementation of `LocalFs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFs;

impl LocalFs for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
            let entry = entry.with_context(|| format!("walking {}", src.display()))?;
            let rel = entry
                .path()
                .strip_prefix(src)
                .with_context(|| format!("{} escapes {}", entry.path().display(), src.display()))?;
            let to = dst.join(rel);
            let kind = entry.file_type();

            if kind.is_dir() {
                std::fs::create_dir_all(&to)
                    .with_context(|| format!("creating directory {}", to.display()))?;
                let perms = entry
                    .metadata()
                    .with_context(|| format!("reading {}", entry.path().display()))?
                    .permissions();
                std::fs::set_permissions(&to, perms)
                    .with_context(|| format!("setting permissions on {}", to.display()))?;
            } else if kind.is_symlink() {
                let link = std::fs::read_link(entry.path())
                    .with_context(|| format!("reading link {}", entry.path().display()))?;
                symlink(&link, &to).with_context(|| format!("creating link {}", to.display()))?;
            } else {
                // std::fs::copy carries the permission bits over.
                std::fs::copy(entry.path(), &to).with_context(|| {
                    format!("copying {} to {}", entry.path().display(), to.display())
                })?;
            }
        }
        Ok(())
    }

    fn chown_tree(&self, path: &Path, owner: SystemIdentity) -> Result<()> {
        for entry in WalkDir::new(path).follow_links(false) {
            let entry = entry.with_context(|| format!("walking {}", path.display()))?;
            lchown(entry.path(), Some(owner.uid), Some(owner.gid)).with_context(|| {
                format!("changing owner of {} to {owner}", entry.path().display())
            })?;
        }
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).with_context(|| format!("writing file {}", path.display()))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading file {}", path.display()))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).with_context(|| format!("removing file {}", path.display()))
    }

    fn unpack_tar_gz(&self, archive: &Path, dest: &Path) -> Result<()> {
        let file = File::open(archive).with_context(|| format!("opening {}", archive.display()))?;
        let mut tar = tar::Archive::new(GzDecoder::new(file));
        tar.set_preserve_permissions(true);
        tar.unpack(dest)
            .with_context(|| format!("extracting {} into {}", archive.display(), dest.display()))
    }
}
