// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent wrapper around `assert_cmd` for spec tests.

use std::process::Output;

use assert_cmd::Command;

pub struct CliBuilder {
    cmd: Command,
}

/// `reaperd` with a scrubbed environment.
pub fn reaperd() -> CliBuilder {
    let mut cmd = Command::cargo_bin("reaperd").expect("reaperd binary is built");
    cmd.env_remove("KUBECONFIG")
        .env_remove("KUBERNETES_SERVICE_HOST")
        .env_remove("KUBERNETES_SERVICE_PORT")
        .env_remove("REAPER_LOG")
        .env_remove("RUST_LOG")
        .env("HOME", std::env::temp_dir());
    CliBuilder { cmd }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require a zero exit status.
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("reaperd runs");
        assert!(
            output.status.success(),
            "expected success, got {:?}\n{}",
            output.status,
            dump(&output)
        );
        RunAssert { output }
    }

    /// Run and require a non-zero exit status.
    pub fn fails(mut self) -> RunAssert {
        let output =
            self.cmd.timeout(std::time::Duration::from_secs(30)).output().expect("reaperd runs");
        assert!(!output.status.success(), "expected failure\n{}", dump(&output));
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(stdout.contains(needle), "stdout lacks {needle:?}\n{}", dump(&self.output));
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(stderr.contains(needle), "stderr lacks {needle:?}\n{}", dump(&self.output));
        self
    }

    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.output.status.code(), Some(expected), "{}", dump(&self.output));
        self
    }
}

fn dump(output: &Output) -> String {
    format!(
        "--- stdout ---\n{}\n--- stderr ---\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
