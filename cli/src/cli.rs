//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::Parser;

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Install a GitHub release as a systemd service behind nginx
#[derive(Parser, Debug)]
#[command(name = "instllr", version)]
pub struct Cli {
    #[command(flatten)]
    pub install: commands::install::InstallArgs,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log diagnostics to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Execute the install.
    ///
    /// # Errors
    ///
    /// Returns an error if any install stage fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            install,
            quiet,
            no_color,
            verbose: _,
        } = self;
        let app = AppContext::new(&OutputFlags { no_color, quiet });
        commands::install::run(&install, &app).await
    }
}
