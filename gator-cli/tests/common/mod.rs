//! Shared setup for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary working directory. Keep it alive for the whole test.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meta(&self) -> PathBuf {
        self.path.join(".gatorgit")
    }

    /// A `gator` invocation rooted at this repository, with colors off.
    pub fn gator(&self) -> Command {
        let mut cmd = Command::cargo_bin("gator").expect("gator binary");
        cmd.current_dir(&self.path).env("NO_COLOR", "1");
        cmd
    }

    pub fn head(&self) -> String {
        fs::read_to_string(self.meta().join(".prev")).expect("head pointer")
    }
}

pub fn setup_empty_dir() -> anyhow::Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();
    Ok(TestRepo { temp_dir, path })
}

/// Runs `gator init` in a fresh directory.
pub fn setup_test_repo() -> anyhow::Result<TestRepo> {
    let repo = setup_empty_dir()?;
    repo.gator().arg("init").assert().success();
    Ok(repo)
}

pub fn create_file(dir: &Path, name: &str, contents: &str) -> anyhow::Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
