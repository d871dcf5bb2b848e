//! Turning a profile into `git config` writes.
//!
//! The applicator never touches git directly: it plans a list of
//! [`ConfigWrite`]s and hands each one to a [`ConfigWriter`], in order. The
//! real writer is [`Repository`](crate::git::Repository); tests record the
//! writes instead.

use std::fmt;

use crate::error::ProfileError;
use crate::git::{ConfigScope, RawConfig};
use crate::profile::Profile;

/// One `git config` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWrite {
    /// `git config <scope> <key> <value>`
    Set { key: String, value: String },
    /// `git config <scope> --add <key> <value>`
    Add { key: String, value: String },
    /// `git config <scope> --unset-all <key>`
    UnsetAll { key: String },
}

impl ConfigWrite {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Add { key, .. } | Self::UnsetAll { key } => key,
        }
    }

    /// Arguments to `git` for this write in `scope`.
    pub fn git_args(&self, scope: ConfigScope) -> Vec<&str> {
        match self {
            Self::Set { key, value } => vec!["config", scope.flag(), key.as_str(), value.as_str()],
            Self::Add { key, value } => {
                vec!["config", scope.flag(), "--add", key.as_str(), value.as_str()]
            }
            Self::UnsetAll { key } => vec!["config", scope.flag(), "--unset-all", key.as_str()],
        }
    }
}

impl fmt::Display for ConfigWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "{key} = {value}"),
            Self::Add { key, value } => write!(f, "{key} += {value}"),
            Self::UnsetAll { key } => write!(f, "{key} (unset)"),
        }
    }
}

/// Destination for configuration writes.
pub trait ConfigWriter {
    fn write(&mut self, scope: ConfigScope, write: &ConfigWrite) -> anyhow::Result<()>;
}

/// Writes for applying `profile` directly, in a fixed order: user name,
/// email and signing key, then commit signing, then signature format.
///
/// Empty strings and an unset `gpgSign` produce no write.
pub fn plan_profile(profile: &Profile) -> Vec<ConfigWrite> {
    let mut writes = Vec::new();

    if let Some(user) = &profile.user {
        for (key, value) in [
            ("user.name", &user.name),
            ("user.email", &user.email),
            ("user.signingKey", &user.signing_key),
        ] {
            if !value.is_empty() {
                writes.push(ConfigWrite::set(key, value));
            }
        }
    }

    if let Some(gpg_sign) = profile.commit.as_ref().and_then(|c| c.gpg_sign) {
        writes.push(ConfigWrite::set("commit.gpgsign", gpg_sign.to_string()));
    }

    if let Some(gpg) = &profile.gpg
        && !gpg.format.is_empty()
    {
        writes.push(ConfigWrite::set("gpg.format", &gpg.format));
    }

    writes
}

/// Writes that turn the configuration `before` into `after`.
///
/// Single values become a plain set. Keys whose values change from or to
/// several values are cleared and re-added one by one, since `git config`
/// refuses to overwrite a multi-valued key. Keys missing from `after` are
/// unset.
pub fn plan_changes(before: &RawConfig, after: &RawConfig) -> Vec<ConfigWrite> {
    let old: std::collections::HashMap<String, &[String]> = before.entries().collect();
    let mut writes = Vec::new();

    for (key, values) in after.entries() {
        let previous = old.get(&key).copied().unwrap_or(&[]);
        if previous == values {
            continue;
        }
        match (previous.len(), values) {
            (0 | 1, [value]) => writes.push(ConfigWrite::set(&key, value)),
            _ => {
                if !previous.is_empty() {
                    writes.push(ConfigWrite::UnsetAll { key: key.clone() });
                }
                for value in values {
                    writes.push(ConfigWrite::Add {
                        key: key.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
    }

    let new: std::collections::HashSet<String> = after.entries().map(|(key, _)| key).collect();
    for (key, _) in before.entries() {
        if !new.contains(&key) {
            writes.push(ConfigWrite::UnsetAll { key });
        }
    }

    writes
}

/// Run `writes` in order against `writer`, all in `scope`.
///
/// Stops at the first failure; writes already made stay in place. Returns
/// the number of writes made.
pub fn apply(
    writes: &[ConfigWrite],
    scope: ConfigScope,
    writer: &mut impl ConfigWriter,
) -> anyhow::Result<usize> {
    for write in writes {
        log::info!("Setting {write} ({scope})");
        writer
            .write(scope, write)
            .map_err(|e| ProfileError::ConfigWriteFailed {
                key: write.key().to_string(),
                scope,
                error: format!("{e:#}"),
            })?;
    }
    Ok(writes.len())
}
