//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` so application services can emit progress events
//! without depending on any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
///
/// Every event is mirrored to `tracing` at debug level so `--verbose` logs
/// keep the full sequence even when the terminal output is quiet.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        tracing::debug!("{message}");
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        tracing::debug!("{message}");
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        tracing::debug!("{message}");
        self.ctx.warn(message);
    }
}
