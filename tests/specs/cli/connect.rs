//! Startup failures before any pod is touched.

use crate::prelude::*;

#[test]
fn missing_kubeconfig_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent-kubeconfig");

    reaperd()
        .args(&["--kubeconfig", path.to_str().unwrap()])
        .fails()
        .code(1)
        .stderr_has("kubeconfig");
}

#[test]
fn malformed_kubeconfig_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kubeconfig");
    std::fs::write(&path, "clusters: [not: a: kubeconfig").unwrap();

    reaperd().args(&["--kubeconfig", path.to_str().unwrap()]).fails().code(1);
}

#[test]
fn startup_is_logged_at_info() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent-kubeconfig");

    reaperd()
        .args(&["--kubeconfig", path.to_str().unwrap()])
        .env("REAPER_WATCH_TIMEOUT_SECS", "42")
        .fails()
        .stderr_has("starting reaper")
        .stderr_has("watch_timeout_secs=42");
}
