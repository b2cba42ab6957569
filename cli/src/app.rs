//! Application context — unified state passed to the command handler.
//!
//! Bundles the output context with the production adapter for every port,
//! so the command only wires services together.

use crate::infra::{
    command_runner::TokioCommandRunner, config::YamlConfigStore, fs::HostFs,
    github::GitHubReleases, path_resolver::WhichResolver, users::SystemUsers,
};
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext`.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    pub runner: TokioCommandRunner,
    pub users: SystemUsers,
    pub fs: HostFs,
    pub resolver: WhichResolver,
    pub config: YamlConfigStore,
    pub releases: GitHubReleases,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let output = OutputContext::new(flags.no_color, flags.quiet);
        let releases = GitHubReleases::from_env(output.show_progress());
        Self {
            output,
            runner: TokioCommandRunner::new(),
            users: SystemUsers,
            fs: HostFs,
            resolver: WhichResolver,
            config: YamlConfigStore,
            releases,
        }
    }

    /// Progress reporter writing to this context's terminal.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
