//! git-profile error types and formatting
//!
//! **`ProfileError`** is a typed enum for domain errors that can be
//! pattern-matched and tested. Use `.into()` to convert to `anyhow::Error`
//! while preserving the type for `downcast_ref`. Display produces styled
//! output for users.

use std::path::PathBuf;

use color_print::cformat;

use crate::config::PROFILES_DIR_ENV;
use crate::git::ConfigScope;
use crate::path::format_path_for_display;
use crate::styling::{error_message, format_with_gutter, hint_message, suggest_command};

/// Domain errors for the profile store, selection and application.
///
/// Store errors are raised before anything is written; write errors are
/// raised mid-apply and name the failing key.
///
/// ```ignore
/// return Err(ProfileError::ProfileNotFound { name, available, suggestion }.into());
///
/// if let Some(ProfileError::DuplicateProfile { name, .. }) = err.downcast_ref() {
///     println!("{name} is defined twice");
/// }
/// ```
#[derive(Debug, Clone)]
pub enum ProfileError {
    // Store errors
    ProfilesDirUnreadable {
        path: PathBuf,
        error: String,
    },
    DuplicateProfile {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    InvalidProfile {
        path: PathBuf,
        error: String,
    },

    // Selection errors
    ProfileNotFound {
        name: String,
        available: Vec<String>,
        /// Closest existing name, when one is similar enough
        suggestion: Option<String>,
    },

    // Repository errors
    ConfigReadFailed {
        scope: ConfigScope,
        error: String,
    },
    ConfigWriteFailed {
        key: String,
        scope: ConfigScope,
        error: String,
    },
}

impl std::error::Error for ProfileError {}

/// Header line followed by gutter-quoted detail, when there is any.
fn format_error_block(header: impl std::fmt::Display, detail: &str) -> String {
    let trimmed = detail.trim();
    if trimmed.is_empty() {
        header.to_string()
    } else {
        format!("{header}\n{}", format_with_gutter(trimmed))
    }
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::ProfilesDirUnreadable { path, error } => {
                let path = format_path_for_display(path);
                write!(
                    f,
                    "{}\n{}",
                    format_error_block(
                        error_message(cformat!("Cannot read profile directory <bold>{path}</>")),
                        error,
                    ),
                    hint_message(cformat!(
                        "Create it, or point <bright-black>{PROFILES_DIR_ENV}</> at an existing directory"
                    ))
                )
            }

            ProfileError::DuplicateProfile {
                name,
                first,
                second,
            } => {
                let first = format_path_for_display(first);
                let second = format_path_for_display(second);
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!(
                        "Profile <bold>{name}</> is defined twice: <bold>{first}</> and <bold>{second}</>"
                    )),
                    hint_message("Rename or remove one of the files")
                )
            }

            ProfileError::InvalidProfile { path, error } => {
                let path = format_path_for_display(path);
                write!(
                    f,
                    "{}",
                    format_error_block(
                        error_message(cformat!("Cannot parse profile <bold>{path}</>")),
                        error,
                    )
                )
            }

            ProfileError::ProfileNotFound {
                name,
                available,
                suggestion,
            } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!("Profile <bold>{name}</> not found"))
                )?;
                if let Some(suggestion) = suggestion {
                    let cmd = suggest_command(&["--profile"], &[suggestion.as_str()]);
                    write!(
                        f,
                        "\n{}",
                        hint_message(cformat!("Did you mean <bright-black>{cmd}</>?"))
                    )?;
                } else if available.is_empty() {
                    write!(f, "\n{}", hint_message("No profiles are defined yet"))?;
                } else {
                    write!(
                        f,
                        "\n{}",
                        hint_message(format!("Available profiles: {}", available.join(", ")))
                    )?;
                }
                Ok(())
            }

            ProfileError::ConfigReadFailed { scope, error } => {
                write!(
                    f,
                    "{}",
                    format_error_block(
                        error_message(cformat!("Cannot read <bold>{scope}</> git config")),
                        error,
                    )
                )
            }

            ProfileError::ConfigWriteFailed { key, scope, error } => {
                write!(
                    f,
                    "{}",
                    format_error_block(
                        error_message(cformat!("Failed to set <bold>{key}</> in {scope} config")),
                        error,
                    )
                )
            }
        }
    }
}
