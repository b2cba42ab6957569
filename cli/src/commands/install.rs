//! `instllr <owner/repo[:tag]>` — fetch a release and install it as a service.

use anyhow::{Context, Result};
use clap::Args;
use instllr_common::ReleaseIdentity;

use crate::app::AppContext;
use crate::application::ports::{ConfigStore, ProgressReporter};
use crate::application::services::{
    deps::resolve_dependencies,
    install::{InstallOptions, InstallOutcome, install_release},
    release::fetch_release,
};
use crate::domain::{check_env, validate_host};
use crate::output::OutputContext;

/// Arguments for an install.
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Release to install, as `owner/repo` or `owner/repo:tag`
    #[arg(value_name = "OWNER/REPO[:TAG]")]
    pub release: String,

    /// Service name: becomes the system user, unit and site name
    #[arg(long)]
    pub host: String,

    /// Local port the application listens on
    #[arg(long)]
    pub port: u16,

    /// Environment assignment passed to the service (repeatable)
    #[arg(long = "app-env", value_name = "KEY=VALUE")]
    pub app_env: Vec<String>,
}

/// Run an install.
///
/// # Errors
///
/// Returns the first fatal error: a malformed argument, a release that cannot
/// be fetched or unpacked, missing environment, or a failed install stage.
pub async fn run(args: &InstallArgs, app: &AppContext) -> Result<()> {
    let requested: ReleaseIdentity = args.release.parse()?;
    validate_host(&args.host)?;

    let config = app
        .config
        .load()
        .with_context(|| format!("loading {}", app.config.path().display()))?;
    let reporter = app.terminal_reporter();
    reporter.step(&format!("Installing {requested}"));

    let workdir = tempfile::Builder::new()
        .prefix("instllr-")
        .tempdir()
        .context("creating temporary directory")?;
    let prepared = fetch_release(
        &app.releases,
        &app.fs,
        &reporter,
        &requested,
        workdir.path(),
    )?;
    tracing::info!(identity = %prepared.identity, "release prepared");

    let deps = resolve_dependencies(
        &app.resolver,
        &reporter,
        prepared.manifest.dependency_names(),
    );

    let env = check_env(&prepared.manifest.env, &args.app_env)?;
    for key in &env.undeclared {
        reporter.warn(&format!("app env '{key}' is not declared by the release"));
    }

    let outcome = install_release(
        &app.runner,
        &app.users,
        &app.fs,
        InstallOptions {
            reporter: &reporter,
            config: &config,
            host: &args.host,
            port: args.port,
            identity: &prepared.identity,
            manifest: &prepared.manifest,
            deps: &deps,
            app_env: &args.app_env,
            source_dir: &prepared.dir,
        },
    )
    .await?;

    print_next_steps(&args.host, &outcome, &app.output);
    Ok(())
}

fn print_next_steps(host: &str, outcome: &InstallOutcome, ctx: &OutputContext) {
    if ctx.quiet {
        return;
    }
    println!();
    ctx.success(&format!("{host} installed"));
    ctx.kv("Target ", &outcome.paths.target_dir.display().to_string());
    ctx.kv("Unit   ", &outcome.paths.unit_file.display().to_string());
    ctx.kv("Site   ", &outcome.paths.proxy_file.display().to_string());
    println!();
    ctx.header("Next:");
    ctx.next_step(1, &format!("systemctl enable --now {host}"));
    ctx.next_step(2, &format!("certbot certonly --nginx -d {host}"));
    ctx.next_step(3, "systemctl restart nginx");
}
