//! Runtime settings for one invocation.
//!
//! The profile directory is resolved once at startup and handed to the
//! scanner as an explicit value:
//!
//! 1. `--profiles-dir <path>` flag
//! 2. `GIT_PROFILES_DIR` environment variable, if set and non-empty
//! 3. Platform default:
//!    - Linux/macOS: `$XDG_CONFIG_HOME/git-profile` or `~/.config/git-profile`
//!    - Windows: `%USERPROFILE%\AppData\Local\git-profile`
//!
//! `~` in the flag or variable is expanded. The default directory is created
//! on first use; an explicitly chosen one must already exist.

use std::path::{Path, PathBuf};

use anyhow::Context;
#[cfg(not(windows))]
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};

use crate::git::ConfigScope;
use crate::path::expand_tilde;

/// Environment variable naming the profile directory.
pub const PROFILES_DIR_ENV: &str = "GIT_PROFILES_DIR";

/// Directory name under the platform config directory.
const APP_DIR_NAME: &str = "git-profile";

/// Where the profile directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ProfilesDirSource {
    Flag,
    Env,
    Default,
}

/// The resolved profile directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilesDir {
    pub path: PathBuf,
    pub source: ProfilesDirSource,
}

impl ProfilesDir {
    /// Resolve from an explicit flag value and the environment variable's value.
    ///
    /// Takes the variable's value rather than reading it, so callers decide
    /// when the environment is consulted.
    pub fn resolve(flag: Option<&Path>, env_value: Option<&str>) -> anyhow::Result<Self> {
        if let Some(path) = flag {
            return Ok(Self {
                path: expand_tilde(&path.to_string_lossy()),
                source: ProfilesDirSource::Flag,
            });
        }
        if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
            return Ok(Self {
                path: expand_tilde(value),
                source: ProfilesDirSource::Env,
            });
        }
        Ok(Self {
            path: default_profiles_dir()?,
            source: ProfilesDirSource::Default,
        })
    }

    /// Resolve using the process environment.
    pub fn from_env(flag: Option<&Path>) -> anyhow::Result<Self> {
        let env_value = std::env::var(PROFILES_DIR_ENV).ok();
        Self::resolve(flag, env_value.as_deref())
    }

    /// Create the default directory if it doesn't exist yet.
    ///
    /// Explicit directories are left alone; a missing one surfaces as an
    /// unreadable-directory error from the scan.
    pub fn ensure_exists(&self) -> anyhow::Result<()> {
        if self.source != ProfilesDirSource::Default || self.path.is_dir() {
            return Ok(());
        }
        log::info!("Creating profile directory {}", self.path.display());
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))
    }
}

/// Platform default profile directory.
#[cfg(not(windows))]
pub fn default_profiles_dir() -> anyhow::Result<PathBuf> {
    // choose_base_strategy uses XDG on Linux and macOS (respects
    // XDG_CONFIG_HOME, falls back to ~/.config)
    let strategy = choose_base_strategy().context("Cannot determine home directory")?;
    Ok(strategy.config_dir().join(APP_DIR_NAME))
}

/// Platform default profile directory.
#[cfg(windows)]
pub fn default_profiles_dir() -> anyhow::Result<PathBuf> {
    let home = crate::path::home_dir().context("Cannot determine home directory")?;
    Ok(home.join("AppData").join("Local").join(APP_DIR_NAME))
}

/// Everything one invocation needs, resolved up front.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profiles_dir: ProfilesDir,
    pub scope: ConfigScope,
    /// Repository to configure (`-C`), defaults to the current directory
    pub repo_path: PathBuf,
}
