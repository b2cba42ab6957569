//! Infrastructure implementation of the `PathResolver` port using `which`.

use std::path::PathBuf;

use crate::application::ports::PathResolver;

/// Looks names up on the installer's own `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhichResolver;

impl PathResolver for WhichResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        match which::which(name) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!(name, error = %e, "executable not found");
                None
            }
        }
    }
}
