//! Per-install filesystem layout derived from the host name and release identity.
//!
//! Pure functions only. The host name doubles as an account name and a path
//! component, so it is validated before any path is derived from it.

use std::path::PathBuf;
use std::sync::LazyLock;

use instllr_common::ReleaseIdentity;
use regex::Regex;

use crate::domain::config::PathsConfig;
use crate::domain::error::LayoutError;

/// Accepted host names: a valid `useradd` name that cannot escape a directory.
pub static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z_][a-z0-9_.-]*$").expect("valid regex")
});

/// Longest account name `useradd` accepts on common distributions.
pub const MAX_HOST_LEN: usize = 32;

/// Validates the `--host` value.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidHost`] if the name is empty, too long, or
/// contains characters outside `[a-z0-9_.-]`.
pub fn validate_host(host: &str) -> Result<(), LayoutError> {
    if host.len() > MAX_HOST_LEN || !HOST_RE.is_match(host) {
        return Err(LayoutError::InvalidHost(host.to_string()));
    }
    Ok(())
}

/// Every path one install touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    /// `<home_root>/<host>/<owner>-<repo>-<tag>`
    pub target_dir: PathBuf,
    /// `<unit_dir>/<host>.service`
    pub unit_file: PathBuf,
    /// `<proxy_dir>/<host>.conf`
    pub proxy_file: PathBuf,
    /// `<log_root>/<host>`
    pub log_dir: PathBuf,
    /// `<cert_root>/<host>`
    pub cert_dir: PathBuf,
}

impl InstallPaths {
    #[must_use]
    pub fn new(paths: &PathsConfig, host: &str, identity: &ReleaseIdentity) -> Self {
        Self {
            target_dir: paths.home_root.join(host).join(identity.dir_name()),
            unit_file: paths.unit_dir.join(format!("{host}.service")),
            proxy_file: paths.proxy_dir.join(format!("{host}.conf")),
            log_dir: paths.log_root.join(host),
            cert_dir: paths.cert_root.join(host),
        }
    }
}
