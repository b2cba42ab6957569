//! Application service — install orchestration use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use instllr_common::{Manifest, ManifestError, ReleaseIdentity};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter, UserDatabase};
use crate::application::services::{
    proxy::write_proxy,
    stage::{run_install_step, stage_files},
    unit::write_unit,
    user::ensure_user,
};
use crate::domain::{
    DependencyMap, InstallPaths, InstllrConfig, ProxyDescriptor, SystemIdentity, UnitDescriptor,
};

/// Pipeline stages, in execution order. There is no resume: a failed stage
/// aborts the install and earlier stages are not undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    ProvisionUser,
    StageFiles,
    RunInstallStep,
    RenderUnit,
    RenderProxy,
}

impl InstallStage {
    pub const ORDER: [Self; 5] = [
        Self::ProvisionUser,
        Self::StageFiles,
        Self::RunInstallStep,
        Self::RenderUnit,
        Self::RenderProxy,
    ];
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProvisionUser => "provision-user",
            Self::StageFiles => "stage-files",
            Self::RunInstallStep => "run-install-step",
            Self::RenderUnit => "render-unit",
            Self::RenderProxy => "render-proxy",
        };
        f.write_str(name)
    }
}

/// Inputs of one install, prepared by the release fetch and env check.
pub struct InstallOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub config: &'a InstllrConfig,
    pub host: &'a str,
    pub port: u16,
    pub identity: &'a ReleaseIdentity,
    pub manifest: &'a Manifest,
    pub deps: &'a DependencyMap,
    pub app_env: &'a [String],
    /// Directory holding the extracted release.
    pub source_dir: &'a Path,
}

/// What a successful install produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub owner: SystemIdentity,
    pub paths: InstallPaths,
}

/// Install a release: provision the user, stage files, run the install step,
/// then write the service unit and proxy site.
///
/// # Errors
///
/// Returns the first stage failure. Nothing done by earlier stages is rolled
/// back.
pub async fn install_release(
    runner: &impl CommandRunner,
    users: &impl UserDatabase,
    local_fs: &impl LocalFs,
    opts: InstallOptions<'_, impl ProgressReporter>,
) -> Result<InstallOutcome> {
    let InstallOptions {
        reporter,
        config,
        host,
        port,
        identity,
        manifest,
        deps,
        app_env,
        source_dir,
    } = opts;
    let paths = InstallPaths::new(&config.paths, host, identity);
    let run = deps
        .resolve_command(&manifest.run)
        .ok_or(ManifestError::EmptyRun)?;

    enter(InstallStage::ProvisionUser);
    let owner = ensure_user(runner, users, reporter, host).await?;

    enter(InstallStage::StageFiles);
    stage_files(local_fs, reporter, source_dir, &paths.target_dir, owner)?;

    enter(InstallStage::RunInstallStep);
    run_install_step(
        runner,
        local_fs,
        reporter,
        deps,
        &manifest.install_step,
        &paths.target_dir,
        owner,
    )
    .await?;

    enter(InstallStage::RenderUnit);
    let unit = UnitDescriptor::new(host, &run, app_env, paths.target_dir.clone(), owner);
    write_unit(local_fs, reporter, &unit, &paths.unit_file)?;

    enter(InstallStage::RenderProxy);
    let proxy = ProxyDescriptor {
        host: host.to_string(),
        port,
        upstream_host: config.proxy.upstream_host.clone(),
        cert_dir: paths.cert_dir.clone(),
        log_dir: paths.log_dir.clone(),
    };
    write_proxy(local_fs, reporter, &proxy, &paths.proxy_file)?;

    Ok(InstallOutcome { owner, paths })
}

fn enter(stage: InstallStage) {
    let step = InstallStage::ORDER
        .iter()
        .position(|s| *s == stage)
        .map_or(0, |i| i + 1);
    tracing::info!(%stage, step, of = InstallStage::ORDER.len(), "entering install stage");
}
