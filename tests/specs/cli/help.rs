//! Help and version output.

use crate::prelude::*;

#[test]
fn help_lists_connection_flags() {
    reaperd()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--master")
        .stdout_has("--kubeconfig");
}

#[test]
fn version_shows_version() {
    reaperd().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_flag_is_rejected() {
    reaperd().args(&["--namespace", "kube-system"]).fails().code(2).stderr_has("--namespace");
}
