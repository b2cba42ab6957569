//! Tests for fetching and unpacking a release.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use instllr_cli::application::services::release::fetch_release;
use instllr_cli::domain::ReleaseError;
use instllr_cli::infra::fs::HostFs;
use instllr_common::ReleaseIdentity;

use crate::mocks::{FakeReleases, RecordingReporter, asset};

const MANIFEST: &str = "run: [node, server.js]\ninstall: [npm, ci]\nrequire: [node]\n";

#[test]
fn test_latest_is_replaced_by_release_tag() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeReleases::new(
        "v2.0.1",
        &[("instllr.yaml", MANIFEST), ("server.js", "// app\n")],
    );
    let requested: ReleaseIdentity = "acme/widget".parse().unwrap();

    let prepared = fetch_release(
        &source,
        &HostFs,
        &RecordingReporter::new(),
        &requested,
        dir.path(),
    )
    .unwrap();

    assert_eq!(*source.requested.lock().unwrap(), ["acme/widget:latest"]);
    assert_eq!(prepared.identity, ReleaseIdentity::new("acme", "widget", "v2.0.1"));
    assert_eq!(prepared.manifest.install_step, ["npm", "ci"]);
    assert!(dir.path().join("server.js").exists());
    assert!(
        !dir.path().join("widget.tar.gz").exists(),
        "archive is removed so it is not staged"
    );
}

#[test]
fn test_more_than_one_asset_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = FakeReleases::new("v1", &[("instllr.yaml", MANIFEST)]);
    source.info.assets.push(asset("widget.zip"));
    let requested = ReleaseIdentity::new("acme", "widget", "v1");

    let err = fetch_release(&source, &HostFs, &RecordingReporter::new(), &requested, dir.path())
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ReleaseError>(),
        Some(&ReleaseError::AssetCount(2))
    );
}

#[test]
fn test_release_without_manifest_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeReleases::new("v1", &[("server.js", "// app\n")]);
    let requested = ReleaseIdentity::new("acme", "widget", "v1");

    let err = fetch_release(&source, &HostFs, &RecordingReporter::new(), &requested, dir.path())
        .unwrap_err();

    assert_eq!(err.to_string(), "release archive does not contain instllr.yaml");
}

#[test]
fn test_manifest_without_run_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeReleases::new("v1", &[("instllr.yaml", "require: [node]\nrun: []\n")]);
    let requested = ReleaseIdentity::new("acme", "widget", "v1");

    let err = fetch_release(&source, &HostFs, &RecordingReporter::new(), &requested, dir.path())
        .unwrap_err();

    assert!(format!("{err:#}").contains("at least one token"));
}
