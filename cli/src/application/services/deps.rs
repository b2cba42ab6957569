//! Application service — dependency resolution.
//!
//! Best effort: a name that cannot be resolved is reported and left out of
//! the map, never turned into an error.

use crate::application::ports::{PathResolver, ProgressReporter};
use crate::domain::DependencyMap;

/// Resolve every name on the executable search path.
///
/// Names containing a `/` are paths already; they are left unresolved
/// without a warning so callers use them verbatim.
pub fn resolve_dependencies<'a>(
    resolver: &impl PathResolver,
    reporter: &impl ProgressReporter,
    names: impl IntoIterator<Item = &'a str>,
) -> DependencyMap {
    let mut deps = DependencyMap::new();
    for name in names {
        if name.contains('/') {
            tracing::debug!(name, "dependency is a path, skipping lookup");
            continue;
        }
        match resolver.resolve(name) {
            Some(path) => {
                tracing::debug!(name, path = %path.display(), "dependency resolved");
                deps.insert(name, path);
            }
            None => reporter.warn(&format!(
                "command path not resolved for {name}, using it as given"
            )),
        }
    }
    deps
}
