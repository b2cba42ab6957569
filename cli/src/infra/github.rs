//! GitHub releases API client — implements the `ReleaseSource` port.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use instllr_common::DEFAULT_TAG;
use sha2::{Digest, Sha256};

use crate::application::ports::ReleaseSource;
use crate::domain::{ReleaseAsset, ReleaseError, ReleaseInfo, hex_encode};

/// Public GitHub API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("instllr/", env!("CARGO_PKG_VERSION"));

/// Release source backed by the GitHub REST API.
///
/// The API root can be redirected with `INSTLLR_GITHUB_API_URL`; a
/// `GITHUB_TOKEN` in the environment is sent as a bearer token.
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    api_url: String,
    token: Option<String>,
    show_progress: bool,
}

impl GitHubReleases {
    /// Build a client from the environment.
    #[must_use]
    pub fn from_env(show_progress: bool) -> Self {
        let api_url = std::env::var("INSTLLR_GITHUB_API_URL")
            .unwrap_or_else(|_| GITHUB_API_URL.to_string());
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        Self {
            api_url,
            token,
            show_progress,
        }
    }

    fn get(&self, url: &str, accept: &str) -> ureq::Request {
        let req = ureq::get(url)
            .set("Accept", accept)
            .set("User-Agent", USER_AGENT);
        match &self.token {
            Some(token) => req.set("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }
}

/// API endpoint for a release; `latest` maps to the newest published release.
#[must_use]
pub fn release_url(api_url: &str, owner: &str, repo: &str, tag: &str) -> String {
    let api = api_url.trim_end_matches('/');
    if tag == DEFAULT_TAG {
        format!("{api}/repos/{owner}/{repo}/releases/latest")
    } else {
        format!("{api}/repos/{owner}/{repo}/releases/tags/{tag}")
    }
}

impl ReleaseSource for GitHubReleases {
    fn release(&self, owner: &str, repo: &str, tag: &str) -> Result<ReleaseInfo> {
        let url = release_url(&self.api_url, owner, repo, tag);
        tracing::debug!(%url, "fetching release metadata");

        match self.get(&url, "application/vnd.github+json").call() {
            Ok(resp) => {
                let body = resp.into_string().context("reading release response")?;
                serde_json::from_str(&body).context("parsing release response")
            }
            Err(ureq::Error::Status(404, _)) => {
                Err(ReleaseError::NotFound(format!("{owner}/{repo}:{tag}")).into())
            }
            Err(ureq::Error::Status(403, _)) => anyhow::bail!(
                "Cannot fetch release: rate limited.\n\nTry again in a few minutes, or set GITHUB_TOKEN."
            ),
            Err(ureq::Error::Status(code, _)) => anyhow::bail!("Cannot fetch release: HTTP {code}"),
            Err(e) => Err(anyhow::Error::new(e).context("Cannot fetch release: no network connection")),
        }
    }

    fn download(&self, asset: &ReleaseAsset, dir: &Path) -> Result<PathBuf> {
        let file_name = Path::new(&asset.name)
            .file_name()
            .with_context(|| format!("invalid asset name '{}'", asset.name))?;
        let dest = dir.join(file_name);
        tracing::debug!(url = %asset.download_url, dest = %dest.display(), "downloading asset");

        let response = match self.get(&asset.download_url, "application/octet-stream").call() {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => anyhow::bail!("Download failed: HTTP {code}"),
            Err(e) => return Err(anyhow::Error::new(e).context("Download interrupted")),
        };

        let total = response
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok())
            .or((asset.size > 0).then_some(asset.size));
        let pb = make_progress_bar(self.show_progress, total);

        let mut file =
            File::create(&dest).with_context(|| format!("creating {}", dest.display()))?;
        let mut hasher = Sha256::new();
        let mut reader = response.into_reader();
        let mut buf = vec![0u8; 64 * 1024];
        loop {
            let n = reader.read(&mut buf).context("Download interrupted")?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            file.write_all(&buf[..n]).context("Download interrupted")?;
            pb.inc(n as u64);
        }
        pb.finish_and_clear();
        file.flush()
            .with_context(|| format!("writing {}", dest.display()))?;

        verify_digest(asset, &hex_encode(&hasher.finalize()))?;
        Ok(dest)
    }
}

/// Compare a computed SHA-256 against the asset's published digest.
/// Assets without a `sha256:` digest are accepted unchecked.
///
/// # Errors
///
/// Returns [`ReleaseError::DigestMismatch`] when both are known and differ.
pub fn verify_digest(asset: &ReleaseAsset, actual: &str) -> Result<(), ReleaseError> {
    match asset.sha256() {
        Some(expected) if !expected.eq_ignore_ascii_case(actual) => {
            Err(ReleaseError::DigestMismatch {
                asset: asset.name.clone(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
        Some(_) => Ok(()),
        None => {
            tracing::debug!(asset = %asset.name, "no published digest, skipping checksum");
            Ok(())
        }
    }
}

fn make_progress_bar(show: bool, total: Option<u64>) -> indicatif::ProgressBar {
    if !show {
        return indicatif::ProgressBar::hidden();
    }
    if let Some(t) = total {
        let pb = indicatif::ProgressBar::new(t);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("    {bar:40.cyan/dim} {percent}%  {bytes}/{total_bytes}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("━━─"),
        );
        pb
    } else {
        indicatif::ProgressBar::new_spinner()
    }
}
