//! Cross-checks `--app-env` assignments against the manifest's `env` list.

use std::collections::BTreeSet;

use crate::domain::error::EnvError;

/// Result of a successful environment check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvCheck {
    /// Supplied keys the manifest does not declare.
    pub undeclared: Vec<String>,
}

/// Verifies every declared variable is supplied as a well-formed `KEY=VALUE`.
///
/// # Errors
///
/// Returns [`EnvError::Malformed`] for the first assignment without a key, or
/// [`EnvError::Missing`] listing every declared name that was not supplied.
pub fn check_env(declared: &[String], supplied: &[String]) -> Result<EnvCheck, EnvError> {
    let mut keys = BTreeSet::new();
    for assignment in supplied {
        match assignment.split_once('=') {
            Some((key, _)) if !key.is_empty() => {
                keys.insert(key);
            }
            _ => return Err(EnvError::Malformed(assignment.clone())),
        }
    }

    let missing: Vec<String> = declared
        .iter()
        .filter(|name| !keys.contains(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(EnvError::Missing(missing));
    }

    let undeclared = keys
        .into_iter()
        .filter(|key| !declared.iter().any(|d| d == key))
        .map(str::to_string)
        .collect();
    Ok(EnvCheck { undeclared })
}
