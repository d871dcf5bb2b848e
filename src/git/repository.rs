use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

use crate::apply::{ConfigWrite, ConfigWriter};
use crate::error::ProfileError;

use super::{ConfigScope, GitConfig};

/// A git repository whose configuration git-profile reads and writes.
///
/// All access goes through the `git` binary run in the repository
/// directory, so git decides which file each scope maps to.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path this repository was created with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn logging_context(&self) -> String {
        if self.path.to_str() == Some(".") {
            ".".to_string()
        } else {
            self.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?")
                .to_string()
        }
    }

    /// Run a git command in this repository's context.
    ///
    /// Executes the git command with this repository's path as the working directory
    /// and returns the stdout output.
    ///
    /// # Examples
    /// ```no_run
    /// use git_profile::git::Repository;
    ///
    /// let repo = Repository::at(".");
    /// let name = repo.run_command(&["config", "--local", "--get", "user.name"])?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        use crate::shell_exec::run;

        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);

        let output = run(&mut cmd, Some(&self.logging_context()))
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            let error_msg = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if error_msg.is_empty() {
                bail!("git {} exited with {}", args.join(" "), output.status);
            }
            bail!("{}", error_msg);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !stdout.is_empty() {
            for line in stdout.trim().lines() {
                log::trace!("  {}", line);
            }
        }
        Ok(stdout)
    }

    /// Read the configuration of one scope.
    ///
    /// Only the entries stored in that scope's file are returned, not the
    /// effective configuration with global and system values mixed in.
    ///
    /// A scope whose file doesn't exist yet (a fresh `config.worktree`)
    /// reads as empty.
    pub fn read_config(&self, scope: ConfigScope) -> anyhow::Result<GitConfig> {
        let output = match self.run_command(&["config", scope.flag(), "--list", "--null"]) {
            Ok(output) => output,
            Err(_) if self.scope_file(scope).is_some_and(|path| !path.exists()) => {
                log::debug!("No {scope} config file yet");
                String::new()
            }
            Err(e) => {
                return Err(ProfileError::ConfigReadFailed {
                    scope,
                    error: format!("{e:#}"),
                }
                .into());
            }
        };
        let config = GitConfig::parse_list(&output);
        log::debug!(
            "Read {} {scope} config entries",
            config.raw.entries().count()
        );
        Ok(config)
    }

    /// The file backing `scope`, as git resolves it for this repository.
    ///
    /// `None` outside a repository.
    fn scope_file(&self, scope: ConfigScope) -> Option<PathBuf> {
        let name = match scope {
            ConfigScope::Local => "config",
            ConfigScope::Worktree => "config.worktree",
        };
        let output = self.run_command(&["rev-parse", "--git-path", name]).ok()?;
        Some(self.path.join(output.trim()))
    }
}

impl ConfigWriter for Repository {
    fn write(&mut self, scope: ConfigScope, write: &ConfigWrite) -> anyhow::Result<()> {
        self.run_command(&write.git_args(scope))?;
        Ok(())
    }
}
