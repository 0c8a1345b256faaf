// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.
//!
//! Every command runs against its own state directory so saved settings
//! and retained logs never leak between specs or into the user's home.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the `pubrun` binary built for this workspace.
///
/// The binary lives in another package, so Cargo does not export
/// `CARGO_BIN_EXE_pubrun` here; resolve it from the target directory.
pub fn pubrun_bin() -> PathBuf {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let target = match std::env::var_os("CARGO_TARGET_DIR") {
        Some(dir) => root.join(dir),
        None => root.join("target"),
    };
    target.join("debug").join(format!("pubrun{}", std::env::consts::EXE_SUFFIX))
}

/// `pubrun` with an isolated, throwaway state directory.
pub fn cli() -> CliBuilder {
    CliBuilder::new(None)
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
    _state: Option<TempDir>,
}

impl CliBuilder {
    fn new(state_dir: Option<&Path>) -> Self {
        let mut cmd = assert_cmd::Command::new(pubrun_bin());
        cmd.env_remove("PUBRUN_QUEUE_URL")
            .env_remove("PUBRUN_BROWSER_URL")
            .env_remove("PUBRUN_LOG")
            .env("NO_COLOR", "1");
        let scratch = match state_dir {
            Some(dir) => {
                cmd.env("PUBRUN_STATE_DIR", dir);
                None
            }
            None => {
                let dir = TempDir::new().unwrap();
                cmd.env("PUBRUN_STATE_DIR", dir.path());
                Some(dir)
            }
        };
        Self { cmd, _state: scratch }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(run.code == Some(0), "expected success, got {:?}\n{}", run.code, run.describe());
        run
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(run.code != Some(0), "expected failure\n{}", run.describe());
        run
    }
}

pub struct RunAssert {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    fn describe(&self) -> String {
        format!("--- stdout ---\n{}\n--- stderr ---\n{}", self.stdout, self.stderr)
    }

    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.code, Some(expected), "{}", self.describe());
        self
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {needle:?}\n{}", self.describe());
        self
    }
}

/// A state directory shared by several invocations.
pub struct State {
    dir: TempDir,
}

impl State {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.file(name), contents).unwrap();
    }

    pub fn pubrun(&self) -> CliBuilder {
        CliBuilder::new(Some(self.dir.path()))
    }
}

/// Base URL of a local port with nothing listening on it.
pub fn dead_server() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
