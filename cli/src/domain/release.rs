//! Release metadata as reported by the GitHub releases API, and manifest parsing.

use anyhow::{Context, Result};
use instllr_common::Manifest;
use serde::Deserialize;

use crate::domain::error::ReleaseError;

/// A published release.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseInfo {
    #[serde(rename = "tag_name")]
    pub tag: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    #[serde(default)]
    pub size: u64,
    /// `sha256:<hex>` when GitHub has computed it.
    #[serde(default)]
    pub digest: Option<String>,
}

impl ReleaseAsset {
    /// Hex SHA-256 from the `digest` field, if it uses the `sha256:` scheme.
    #[must_use]
    pub fn sha256(&self) -> Option<&str> {
        self.digest.as_deref()?.strip_prefix("sha256:")
    }
}

impl ReleaseInfo {
    /// The release's only asset.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::AssetCount`] unless exactly one asset is attached.
    pub fn single_asset(&self) -> Result<&ReleaseAsset, ReleaseError> {
        match self.assets.as_slice() {
            [asset] => Ok(asset),
            other => Err(ReleaseError::AssetCount(other.len())),
        }
    }
}

/// Lower-case hex encoding, as used by GitHub's `sha256:` digests.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[usize::from(b >> 4)]));
        out.push(char::from(HEX[usize::from(b & 0xf)]));
    }
    out
}

/// Parses and validates `instllr.yaml` content.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the manifest is unusable.
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let manifest: Manifest = serde_yaml::from_str(content).context("cannot parse manifest")?;
    manifest.validate()?;
    Ok(manifest)
}
