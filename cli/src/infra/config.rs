//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::InstllrConfig;

/// Default location of the host layout configuration.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/instllr/config.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
///
/// The path is taken from `INSTLLR_CONFIG` when set. A missing file yields
/// the default layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<InstllrConfig> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(InstllrConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: InstllrConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid {}", path.display()))?;
        Ok(config)
    }

    fn path(&self) -> PathBuf {
        std::env::var_os("INSTLLR_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }
}
