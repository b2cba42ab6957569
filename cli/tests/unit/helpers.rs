//! Shared test helpers: exit statuses, temp host layouts and release trees.

#![allow(dead_code, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use instllr_cli::domain::{InstllrConfig, PathsConfig, SystemIdentity};
use tempfile::TempDir;

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// The raw wait-status encodes the exit code in bits 8–15, so we shift.
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// uid/gid of the test process, the only owner a non-root chown accepts.
pub fn current_owner() -> SystemIdentity {
    SystemIdentity {
        uid: nix::unistd::getuid().as_raw(),
        gid: nix::unistd::getgid().as_raw(),
    }
}

/// A throwaway host: every configured root lives under one temp directory.
pub struct TestHost {
    pub root: TempDir,
    pub config: InstllrConfig,
}

impl TestHost {
    pub fn new() -> Self {
        let root = TempDir::new().expect("temp dir");
        let base = root.path();
        let paths = PathsConfig {
            home_root: base.join("home"),
            unit_dir: base.join("systemd"),
            proxy_dir: base.join("sites-enabled"),
            log_root: base.join("log"),
            cert_root: base.join("letsencrypt/live"),
        };
        for dir in [&paths.home_root, &paths.unit_dir, &paths.proxy_dir] {
            std::fs::create_dir_all(dir).expect("layout dir");
        }
        let config = InstllrConfig {
            paths,
            ..InstllrConfig::default()
        };
        Self { root, config }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Extracted release directory with a couple of files in it.
    pub fn release_dir(&self) -> PathBuf {
        let dir = self.path("release");
        write_tree(
            &dir,
            &[
                ("server.js", "require('http').createServer().listen(process.env.PORT)\n"),
                ("package.json", "{\"name\":\"widget\"}\n"),
                ("public/index.html", "<h1>widget</h1>\n"),
            ],
        );
        dir
    }
}

pub fn write_tree(dir: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("parent dir");
        }
        std::fs::write(path, content).expect("write file");
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read file")
}
