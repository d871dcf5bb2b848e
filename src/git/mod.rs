//! Git configuration model and repository access.

mod config;
mod raw;
mod repository;


pub use config::{Branch, Core, GitConfig, Identity, Init, Remote, UrlRewrite, User, parse_bool};
pub use raw::{RawConfig, RawSection, SectionId};
pub use repository::Repository;

/// Which configuration layer a write lands in.
///
/// Scope selects the file (`.git/config` or `.git/worktrees/<name>/config.worktree`);
/// it never changes merge semantics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::IntoStaticStr, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ConfigScope {
    /// Repository-level configuration (`git config --local`)
    #[default]
    Local,
    /// Per-worktree override layer (`git config --worktree`)
    Worktree,
}

impl ConfigScope {
    /// The `git config` flag selecting this scope.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Local => "--local",
            Self::Worktree => "--worktree",
        }
    }
}
