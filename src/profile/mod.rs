//! Git identity profiles.
//!
//! A profile is one TOML file in the profile directory:
//!
//! ```toml
//! [user]
//! name = "Ada Lovelace"
//! email = "ada@example.com"
//! signingKey = "~/.ssh/id_ed25519.pub"
//!
//! [commit]
//! gpgSign = true
//!
//! [gpg]
//! format = "ssh"
//! ```
//!
//! Every section and field is optional. An empty string means "don't set",
//! and an absent `gpgSign` means "leave signing alone". Unknown sections and
//! keys are ignored.

mod store;

use serde::Deserialize;

use crate::git::{GitConfig, SectionId, User};
use crate::merge::{Merge, merge_flag, merge_optional, merge_string};

pub use store::{PROFILE_EXTENSIONS, ProfileStore, profile_name};

/// A named bundle of identity and signing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default, alias = "User")]
    pub user: Option<UserSettings>,

    #[serde(default, alias = "Commit")]
    pub commit: Option<CommitSettings>,

    #[serde(default, alias = "GPG", alias = "Gpg")]
    pub gpg: Option<GpgSettings>,
}

/// `[user]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserSettings {
    #[serde(default, alias = "Name")]
    pub name: String,

    #[serde(default, alias = "Email")]
    pub email: String,

    #[serde(
        default,
        rename = "signingKey",
        alias = "signingkey",
        alias = "signing-key",
        alias = "signing_key",
        alias = "SigningKey"
    )]
    pub signing_key: String,
}

/// `[commit]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommitSettings {
    /// Sign every commit. Unset leaves the repository's setting alone.
    #[serde(
        default,
        rename = "gpgSign",
        alias = "gpgsign",
        alias = "gpg-sign",
        alias = "gpg_sign",
        alias = "GPGSign"
    )]
    pub gpg_sign: Option<bool>,
}

/// `[gpg]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GpgSettings {
    /// Signature format: `openpgp`, `x509` or `ssh`
    #[serde(default, alias = "Format")]
    pub format: String,
}

impl Profile {
    /// Deserialize a profile from the raw bytes of a profile file.
    pub fn from_toml(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(toml::from_str(text)?)
    }

    /// True when applying this profile would write nothing.
    pub fn is_empty(&self) -> bool {
        let user_empty = self.user.as_ref().is_none_or(|u| {
            u.name.is_empty() && u.email.is_empty() && u.signing_key.is_empty()
        });
        let commit_empty = self.commit.as_ref().is_none_or(|c| c.gpg_sign.is_none());
        let gpg_empty = self.gpg.as_ref().is_none_or(|g| g.format.is_empty());
        user_empty && commit_empty && gpg_empty
    }

    /// This profile as a git configuration, for the structural merge.
    ///
    /// `[user]` maps onto the typed user section; `commit.gpgsign` and
    /// `gpg.format` only exist in the raw mapping.
    pub fn to_git_config(&self) -> GitConfig {
        let mut config = GitConfig::default();
        if let Some(user) = &self.user {
            config.user = User {
                name: user.name.clone(),
                email: user.email.clone(),
                signing_key: user.signing_key.clone(),
            };
        }
        if let Some(gpg_sign) = self.commit.as_ref().and_then(|c| c.gpg_sign) {
            config.raw.set(
                &SectionId::new("commit"),
                "gpgsign",
                if gpg_sign { "true" } else { "false" },
            );
        }
        if let Some(gpg) = self.gpg.as_ref().filter(|g| !g.format.is_empty()) {
            config.raw.set(&SectionId::new("gpg"), "format", &gpg.format);
        }
        config.sync_raw();
        config
    }
}

impl Merge for UserSettings {
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            name: merge_string(&self.name, &overlay.name),
            email: merge_string(&self.email, &overlay.email),
            signing_key: merge_string(&self.signing_key, &overlay.signing_key),
        }
    }
}

impl Merge for CommitSettings {
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            gpg_sign: merge_flag(self.gpg_sign, overlay.gpg_sign),
        }
    }
}

impl Merge for GpgSettings {
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            format: merge_string(&self.format, &overlay.format),
        }
    }
}

impl Merge for Profile {
    /// Layer `overlay` on top of this profile.
    ///
    /// A section the overlay doesn't have leaves this profile's section
    /// untouched; within a section, only non-empty strings and set flags
    /// override.
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            user: merge_optional(self.user.as_ref(), overlay.user.as_ref()),
            commit: merge_optional(self.commit.as_ref(), overlay.commit.as_ref()),
            gpg: merge_optional(self.gpg.as_ref(), overlay.gpg.as_ref()),
        }
    }
}
