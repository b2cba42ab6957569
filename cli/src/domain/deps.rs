//! Dependency map: command name to absolute path, with literal fallback.
//!
//! A missing entry is a normal state. Every lookup yields either the resolved
//! path or the name exactly as the manifest spelled it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Outcome of looking up one command token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPath<'a> {
    /// Found on the search path.
    Resolved(&'a Path),
    /// Not resolved; the token is used verbatim.
    Literal(&'a str),
}

impl CommandPath<'_> {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, CommandPath::Resolved(_))
    }

    #[must_use]
    pub fn to_program(&self) -> String {
        match self {
            CommandPath::Resolved(path) => path.to_string_lossy().into_owned(),
            CommandPath::Literal(name) => (*name).to_string(),
        }
    }
}

/// Resolved dependency paths, keyed by the name used in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap(BTreeMap<String, PathBuf>);

impl DependencyMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.0.insert(name.into(), path.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.0.get(name).map(PathBuf::as_path)
    }

    /// Resolve-or-literal lookup for a single token.
    #[must_use]
    pub fn command_for<'a>(&'a self, token: &'a str) -> CommandPath<'a> {
        self.get(token)
            .map_or(CommandPath::Literal(token), CommandPath::Resolved)
    }

    /// Resolves the executable of a token list, keeping the arguments verbatim.
    ///
    /// Returns `None` for an empty token list.
    #[must_use]
    pub fn resolve_command(&self, tokens: &[String]) -> Option<ResolvedCommand> {
        let (first, args) = tokens.split_first()?;
        let command = self.command_for(first);
        Some(ResolvedCommand {
            program: command.to_program(),
            args: args.to_vec(),
            resolved: command.is_resolved(),
        })
    }
}

impl<K: Into<String>, V: Into<PathBuf>> FromIterator<(K, V)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A token list whose executable went through the dependency map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub program: String,
    pub args: Vec<String>,
    /// `false` when `program` is the literal manifest token.
    pub resolved: bool,
}

impl ResolvedCommand {
    /// Program and arguments joined by single spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
