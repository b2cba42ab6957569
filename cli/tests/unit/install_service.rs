//! Tests for the install pipeline: user → stage → install step → unit → proxy.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use instllr_cli::application::services::deps::resolve_dependencies;
use instllr_cli::application::services::install::{InstallOptions, install_release};
use instllr_cli::domain::{DependencyMap, InstallError, InstallPaths};
use instllr_cli::infra::fs::HostFs;
use instllr_common::{Manifest, ReleaseIdentity};

use crate::helpers::{TestHost, current_owner, read};
use crate::mocks::{FakeHost, FixedResolver, RecordingReporter};

fn manifest(install: &[&str]) -> Manifest {
    Manifest {
        run: vec!["node".into(), "server.js".into()],
        install_step: install.iter().map(ToString::to_string).collect(),
        require: vec!["node".into(), "npm".into()],
        env: vec!["PORT".into()],
    }
}

fn identity() -> ReleaseIdentity {
    ReleaseIdentity::new("acme", "widget", "v1.4.0")
}

fn node_deps(reporter: &RecordingReporter, m: &Manifest) -> DependencyMap {
    let resolver = FixedResolver::new(&[("node", "/usr/bin/node"), ("npm", "/usr/bin/npm")]);
    resolve_dependencies(&resolver, reporter, m.dependency_names())
}

async fn install(
    host: &TestHost,
    fake: &FakeHost,
    reporter: &RecordingReporter,
    m: &Manifest,
    deps: &DependencyMap,
) -> anyhow::Result<InstallPaths> {
    let source = host.release_dir();
    let env = vec!["PORT=8080".to_string()];
    let outcome = install_release(
        fake,
        fake,
        &HostFs,
        InstallOptions {
            reporter,
            config: &host.config,
            host: "widget",
            port: 8080,
            identity: &identity(),
            manifest: m,
            deps,
            app_env: &env,
            source_dir: &source,
        },
    )
    .await?;
    assert_eq!(outcome.owner, current_owner());
    Ok(outcome.paths)
}

#[tokio::test]
async fn test_full_install_writes_every_artifact() {
    let host = TestHost::new();
    let fake = FakeHost::new().step_writes("node_modules.marker");
    let reporter = RecordingReporter::new();
    let m = manifest(&["npm", "ci"]);
    let deps = node_deps(&reporter, &m);

    let paths = install(&host, &fake, &reporter, &m, &deps).await.unwrap();

    let target = host.path("home/widget/acme-widget-v1.4.0");
    assert_eq!(paths.target_dir, target);
    assert_eq!(read(&target.join("public/index.html")), "<h1>widget</h1>\n");
    assert!(target.join("node_modules.marker").exists());

    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program, "useradd");
    assert_eq!(calls[0].args, ["-mrU", "widget"]);
    assert_eq!(calls[1].program, "/usr/bin/npm");
    assert_eq!(calls[1].args, ["ci"]);
    assert_eq!(calls[1].dir.as_deref(), Some(target.as_path()));

    let owner = current_owner();
    let unit = read(&host.path("systemd/widget.service"));
    assert!(unit.contains("ExecStart=/usr/bin/node server.js\n"));
    assert!(unit.contains(&format!("WorkingDirectory={}\n", target.display())));
    assert!(unit.contains(&format!("User={}\nGroup={}\n", owner.uid, owner.gid)));
    assert!(unit.contains("Environment=\"PORT=8080\"\n"));

    let site = read(&host.path("sites-enabled/widget.conf"));
    assert!(site.contains("proxy_pass http://127.0.0.1:8080;"));
    assert!(host.path("log/widget").is_dir());

    // No certificate yet: a warning, not a failure.
    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].starts_with("certs directory"));
}

#[tokio::test]
async fn test_existing_user_is_reused() {
    let host = TestHost::new();
    let fake = FakeHost::new().with_user("widget");
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = node_deps(&reporter, &m);

    install(&host, &fake, &reporter, &m, &deps).await.unwrap();

    assert!(fake.calls().is_empty(), "no useradd, no install step");
}

#[tokio::test]
async fn test_existing_target_aborts_without_copying() {
    let host = TestHost::new();
    let target = host.path("home/widget/acme-widget-v1.4.0");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("keep.txt"), "previous install\n").unwrap();

    let fake = FakeHost::new();
    let reporter = RecordingReporter::new();
    let m = manifest(&["npm", "ci"]);
    let deps = node_deps(&reporter, &m);

    let err = install(&host, &fake, &reporter, &m, &deps).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<InstallError>(),
        Some(InstallError::TargetExists(p)) if *p == target
    ));
    assert_eq!(
        err.to_string(),
        format!("directory {} already exists, aborting", target.display())
    );
    let entries: Vec<_> = std::fs::read_dir(&target).unwrap().collect();
    assert_eq!(entries.len(), 1, "nothing copied into the existing directory");
    assert_eq!(fake.programs(), ["useradd"], "install step never ran");
    assert!(!host.path("systemd/widget.service").exists());
}

#[tokio::test]
async fn test_failed_install_step_writes_no_artifacts() {
    let host = TestHost::new();
    let fake = FakeHost::new().step_exits(1);
    let reporter = RecordingReporter::new();
    let m = manifest(&["npm", "ci", "--omit=dev"]);
    let deps = node_deps(&reporter, &m);

    let err = install(&host, &fake, &reporter, &m, &deps).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "install step 'npm ci --omit=dev' failed, aborting"
    );
    assert!(!host.path("systemd/widget.service").exists());
    assert!(!host.path("sites-enabled/widget.conf").exists());
    // Staged files stay behind; there is no rollback.
    assert!(host.path("home/widget/acme-widget-v1.4.0/server.js").exists());
}

#[tokio::test]
async fn test_install_step_launch_failure_is_fatal() {
    let host = TestHost::new();
    let fake = FakeHost::new().step_cannot_spawn();
    let reporter = RecordingReporter::new();
    let m = manifest(&["make", "build"]);
    let deps = node_deps(&reporter, &m);

    let err = install(&host, &fake, &reporter, &m, &deps).await.unwrap_err();

    assert_eq!(err.to_string(), "install step 'make build' failed, aborting");
    let calls = fake.calls();
    assert_eq!(calls[1].program, "make", "unresolved command runs as given");
}

#[tokio::test]
async fn test_unresolved_run_command_falls_back_to_literal() {
    let host = TestHost::new();
    let fake = FakeHost::new();
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = resolve_dependencies(&FixedResolver::new(&[]), &reporter, m.dependency_names());

    install(&host, &fake, &reporter, &m, &deps).await.unwrap();

    let unit = read(&host.path("systemd/widget.service"));
    assert!(unit.contains("ExecStart=node server.js\n"));
    let warnings = reporter.warnings();
    assert!(
        warnings
            .iter()
            .any(|w| w == "command path not resolved for node, using it as given"),
        "{warnings:?}"
    );
}

#[tokio::test]
async fn test_useradd_failure_stops_before_staging() {
    let host = TestHost::new();
    let fake = FakeHost::new().useradd_exits(9);
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = node_deps(&reporter, &m);

    let err = install(&host, &fake, &reporter, &m, &deps).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<InstallError>(),
        Some(InstallError::UserCreation { name, .. }) if name == "widget"
    ));
    assert!(!host.path("home/widget").exists());
}

#[tokio::test]
async fn test_reinstall_of_new_tag_overwrites_unit() {
    let host = TestHost::new();
    let fake = FakeHost::new();
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = node_deps(&reporter, &m);
    install(&host, &fake, &reporter, &m, &deps).await.unwrap();

    let source = host.release_dir();
    let next = ReleaseIdentity::new("acme", "widget", "v1.5.0");
    install_release(
        &fake,
        &fake,
        &HostFs,
        InstallOptions {
            reporter: &reporter,
            config: &host.config,
            host: "widget",
            port: 9090,
            identity: &next,
            manifest: &m,
            deps: &deps,
            app_env: &[],
            source_dir: &source,
        },
    )
    .await
    .unwrap();

    let unit = read(&host.path("systemd/widget.service"));
    assert!(unit.contains("acme-widget-v1.5.0"));
    assert!(!unit.contains("Environment="));
    let site = read(&host.path("sites-enabled/widget.conf"));
    assert!(site.contains("127.0.0.1:9090"));
    assert!(host.path("home/widget/acme-widget-v1.4.0").is_dir());
    assert_eq!(fake.programs(), ["useradd"], "second install reuses the user");
}

#[tokio::test]
async fn test_existing_certs_directory_does_not_warn() {
    let host = TestHost::new();
    std::fs::create_dir_all(host.path("letsencrypt/live/widget")).unwrap();
    let fake = FakeHost::new();
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = node_deps(&reporter, &m);

    install(&host, &fake, &reporter, &m, &deps).await.unwrap();

    assert!(host.path("sites-enabled/widget.conf").exists());
    assert!(reporter.warnings().is_empty(), "{:?}", reporter.warnings());
}

#[tokio::test]
async fn test_unwritable_log_root_aborts_before_site() {
    let host = TestHost::new();
    std::fs::write(host.path("log"), "").unwrap();
    let fake = FakeHost::new();
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = node_deps(&reporter, &m);

    let err = install(&host, &fake, &reporter, &m, &deps).await.unwrap_err();

    assert!(
        format!("{err:#}").contains("creating proxy log directory"),
        "{err:#}"
    );
    assert!(host.path("systemd/widget.service").exists());
    assert!(!host.path("sites-enabled/widget.conf").exists());
}

#[tokio::test]
async fn test_missing_unit_dir_aborts_before_proxy() {
    let mut host = TestHost::new();
    host.config.paths.unit_dir = host.path("missing/systemd");
    let fake = FakeHost::new();
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = node_deps(&reporter, &m);

    let err = install(&host, &fake, &reporter, &m, &deps).await.unwrap_err();

    assert!(err.to_string().starts_with("writing service unit"), "{err:#}");
    assert!(!host.path("missing/systemd/widget.service").exists());
    assert!(!host.path("log/widget").exists());
    assert!(!host.path("sites-enabled/widget.conf").exists());
}

#[tokio::test]
async fn test_missing_proxy_dir_fails_after_unit() {
    let mut host = TestHost::new();
    host.config.paths.proxy_dir = host.path("missing/sites-enabled");
    let fake = FakeHost::new();
    let reporter = RecordingReporter::new();
    let m = manifest(&[]);
    let deps = node_deps(&reporter, &m);

    let err = install(&host, &fake, &reporter, &m, &deps).await.unwrap_err();

    assert!(err.to_string().starts_with("writing proxy site"), "{err:#}");
    assert!(host.path("systemd/widget.service").exists());
    assert!(!host.path("missing/sites-enabled/widget.conf").exists());
}
