// Not every test module uses every helper.
#![allow(dead_code)]

//! # Test Utilities for git-profile
//!
//! `TestEnv` creates an isolated git repository and profile directory in a
//! temporary directory. Each test gets a fresh environment that is cleaned up
//! when the test ends.
//!
//! ## Environment Isolation
//!
//! Both `git` and `git-profile` run with:
//! - No host `GIT_*` variables
//! - Global config pointed at a test file, system config disabled
//! - `HOME` and `XDG_CONFIG_HOME` inside the temp directory
//! - Consistent locale settings
//!
//! so assertions on `git config --local` see only what the test wrote.

use std::path::{Path, PathBuf};
use std::process::Command;

use insta_cmd::get_cargo_bin;
use rstest::fixture;
use tempfile::TempDir;

/// Null device path, platform-appropriate.
#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Canonicalize a path without Windows verbatim prefix (`\\?\`).
pub fn canonicalize(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

/// Configure a git command with isolated environment for testing.
pub fn configure_git_cmd(cmd: &mut Command, git_config_path: &Path, home: &Path) {
    for (key, _) in std::env::vars() {
        if key.starts_with("GIT_") {
            cmd.env_remove(&key);
        }
    }
    cmd.env("GIT_CONFIG_GLOBAL", git_config_path);
    cmd.env("GIT_CONFIG_SYSTEM", NULL_DEVICE);
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join(".config"));
    cmd.env("USERPROFILE", home);
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");
}

/// Check that a git command succeeded, panicking with diagnostics if not.
pub fn check_git_status(output: &std::process::Output, cmd_desc: &str) {
    if !output.status.success() {
        panic!(
            "git {} failed:\nstdout: {}\nstderr: {}",
            cmd_desc,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Basic environment fixture: a fresh repository and an empty profile directory.
///
/// ```ignore
/// #[rstest]
/// fn test_something(env: TestEnv) {
///     env.write_profile("work.toml", "[user]\nname = \"Ada\"\n");
/// }
/// ```
#[fixture]
pub fn env() -> TestEnv {
    TestEnv::new()
}

pub struct TestEnv {
    temp_dir: TempDir, // Must keep to ensure cleanup on drop
    root: PathBuf,
    profiles_dir: PathBuf,
    home: PathBuf,
    git_config_path: PathBuf,
}

impl TestEnv {
    /// Create a fresh repository at `<temp>/repo` and an empty profile
    /// directory at `<temp>/profiles`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base = canonicalize(temp_dir.path()).unwrap();

        let root = base.join("repo");
        let profiles_dir = base.join("profiles");
        let home = base.join("home");
        for dir in [&root, &profiles_dir, &home] {
            std::fs::create_dir(dir).unwrap();
        }

        let git_config_path = base.join("test-gitconfig");
        std::fs::write(
            &git_config_path,
            "[user]\n\tname = Global User\n\temail = global@example.com\n\
             [init]\n\tdefaultBranch = main\n",
        )
        .unwrap();

        let env = Self {
            temp_dir,
            root,
            profiles_dir,
            home,
            git_config_path,
        };
        env.run_git(&["init", "-q"]);
        env
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    pub fn home_path(&self) -> &Path {
        &self.home
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a profile file into the profile directory.
    pub fn write_profile(&self, file_name: &str, contents: &str) {
        std::fs::write(self.profiles_dir.join(file_name), contents).unwrap();
    }

    /// Create a `git` command pre-configured for this test repo.
    #[must_use]
    pub fn git_command(&self) -> Command {
        let mut cmd = Command::new("git");
        configure_git_cmd(&mut cmd, &self.git_config_path, &self.home);
        cmd.current_dir(&self.root);
        cmd
    }

    /// Run a git command in the repo root, panicking on failure.
    pub fn run_git(&self, args: &[&str]) {
        let output = self.git_command().args(args).output().unwrap();
        check_git_status(&output, &args.join(" "));
    }

    /// Value of a key in the repository's local config, or `None` if unset.
    pub fn local_config(&self, key: &str) -> Option<String> {
        self.scoped_config("--local", key)
    }

    /// Value of a key in the worktree config layer, or `None` if unset.
    pub fn worktree_config(&self, key: &str) -> Option<String> {
        self.scoped_config("--worktree", key)
    }

    fn scoped_config(&self, scope: &str, key: &str) -> Option<String> {
        let output = self
            .git_command()
            .args(["config", scope, "--get", key])
            .output()
            .unwrap();
        // Exit code 1 means the key is not set
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// All values of a multi-valued key in the local config.
    pub fn local_config_all(&self, key: &str) -> Vec<String> {
        let output = self
            .git_command()
            .args(["config", "--local", "--get-all", key])
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Create a `git-profile` command for this environment, run from the
    /// repository root with `GIT_PROFILES_DIR` pointing at the profile
    /// directory.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin("git-profile"));
        configure_git_cmd(&mut cmd, &self.git_config_path, &self.home);
        cmd.env("GIT_PROFILES_DIR", &self.profiles_dir);
        cmd.env("RUST_LOG", "warn");
        cmd.env_remove("CLICOLOR_FORCE");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(&self.root);
        cmd
    }
}

/// Snapshot settings that replace the temp directory with `[TEMP]`.
pub fn setup_snapshot_settings(env: &TestEnv) -> insta::Settings {
    let mut settings = insta::Settings::clone_current();
    settings.set_snapshot_path("../snapshots");
    let base = canonicalize(env.temp_path()).unwrap_or_else(|_| env.temp_path().to_path_buf());
    settings.add_filter(&regex::escape(&base.to_string_lossy()), "[TEMP]");
    settings.add_filter(&regex::escape(&env.temp_path().to_string_lossy()), "[TEMP]");
    settings
}
