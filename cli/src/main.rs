//! instllr - install a GitHub release as a systemd service behind nginx

use clap::Parser;
use instllr_cli::cli::Cli;
use instllr_cli::output::OutputContext;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let no_color = cli.no_color;
    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "install aborted");
        OutputContext::new(no_color, false).error(&format!("Error: {e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "instllr_cli=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
