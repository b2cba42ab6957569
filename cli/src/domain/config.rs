//! Domain types and validators for instllr configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::LayoutError;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/instllr/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InstllrConfig {
    /// Where installs, generated configuration and logs are placed.
    pub paths: PathsConfig,
    /// Reverse proxy settings.
    pub proxy: ProxyConfig,
}

/// Host directory layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Parent of the per-host home directories.
    pub home_root: PathBuf,
    /// Directory holding systemd unit files.
    pub unit_dir: PathBuf,
    /// Directory holding enabled nginx sites.
    pub proxy_dir: PathBuf,
    /// Parent of the per-host nginx log directories.
    pub log_root: PathBuf,
    /// Parent of the per-host TLS certificate directories.
    pub cert_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            home_root: PathBuf::from("/home"),
            unit_dir: PathBuf::from("/etc/systemd/system"),
            proxy_dir: PathBuf::from("/etc/nginx/sites-enabled"),
            log_root: PathBuf::from("/var/log"),
            cert_root: PathBuf::from("/etc/letsencrypt/live"),
        }
    }
}

/// Reverse proxy configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Address the application listens on, as seen from nginx.
    #[serde(default = "default_upstream_host")]
    pub upstream_host: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_host: default_upstream_host(),
        }
    }
}

fn default_upstream_host() -> String {
    "127.0.0.1".to_string()
}

// ── Validators ───────────────────────────────────────────────────────────────

impl InstllrConfig {
    /// Validates that every configured root is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RelativePath`] naming the first offending key.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let p = &self.paths;
        let roots: [(&'static str, &Path); 5] = [
            ("home_root", &p.home_root),
            ("unit_dir", &p.unit_dir),
            ("proxy_dir", &p.proxy_dir),
            ("log_root", &p.log_root),
            ("cert_root", &p.cert_root),
        ];
        for (key, path) in roots {
            if !path.is_absolute() {
                return Err(LayoutError::RelativePath {
                    key,
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
