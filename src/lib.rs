//! Named git identity profiles, applied per repository.
//!
//! git-profile is a CLI tool: profiles live as TOML files in a profile
//! directory, and `git-profile --profile <name>` writes the chosen identity
//! (name, email, signing key, commit signing, signature format) into a
//! repository's local or worktree configuration.
//!
//! The library API is not stable.

pub mod apply;
pub mod config;
pub mod error;
pub mod git;
pub mod merge;
pub mod path;
pub mod profile;
pub mod shell_exec;
pub mod styling;

pub use error::ProfileError;
pub use profile::{Profile, ProfileStore};
