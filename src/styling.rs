//! Styling for terminal output.
//!
//! - **stdout**: primary data (`--list` names, `--show` config)
//! - **stderr**: status messages (success, errors, hints, warnings)
//!
//! This separation allows piping (`git-profile --list | fzf`) without status
//! messages interfering. `anstream` strips colors when the stream is not a
//! terminal.
//!
//! Use `cformat!` with HTML-like tags for user-facing messages:
//!
//! ```
//! use color_print::cformat;
//!
//! let profile = "work";
//! let msg = cformat!("<green>Applied profile <bold>{profile}</></>");
//! ```

use std::borrow::Cow;
use std::fmt;

use anstyle::{AnsiColor, Color, Style};
use color_print::{cformat, cstr};
use shell_escape::escape;

pub use anstream::{eprintln, print, println};

/// Gutter style for quoted content (config snippets, git stderr)
pub const GUTTER: Style = Style::new().bg_color(Some(Color::Ansi(AnsiColor::BrightWhite)));

/// Success symbol (green ✓)
pub const SUCCESS_SYMBOL: &str = cstr!("<green>✓</>");

/// Error symbol (red ✗)
pub const ERROR_SYMBOL: &str = cstr!("<red>✗</>");

/// Hint symbol (dim ↳)
pub const HINT_SYMBOL: &str = cstr!("<dim>↳</>");

/// Info symbol (dim ○)
pub const INFO_SYMBOL: &str = cstr!("<dim>○</>");

/// A message that has already been formatted with a symbol and styling.
///
/// Message functions take `impl AsRef<str>` and return `FormattedMessage`.
/// Since `FormattedMessage` does not implement `AsRef<str>`, formatting a
/// message twice is a compile error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage(String);

impl fmt::Display for FormattedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format an error message with symbol and red styling
pub fn error_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{ERROR_SYMBOL} <red>{}</>", content.as_ref()))
}

/// Format a hint message with symbol and dim styling
pub fn hint_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{HINT_SYMBOL} <dim>{}</>", content.as_ref()))
}

/// Format a success message with symbol and green styling
pub fn success_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(cformat!("{SUCCESS_SYMBOL} <green>{}</>", content.as_ref()))
}

/// Format an info message with symbol (no color on text)
pub fn info_message(content: impl AsRef<str>) -> FormattedMessage {
    FormattedMessage(format!("{INFO_SYMBOL} {}", content.as_ref()))
}

/// Prefix every line of `content` with a gutter, for quoting multi-line text
/// under a message.
pub fn format_with_gutter(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("{GUTTER} {GUTTER:#} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a copy-pasteable command suggestion like `git-profile --profile work`.
///
/// Arguments with spaces or shell metacharacters are escaped POSIX-style.
pub fn suggest_command(flags: &[&str], args: &[&str]) -> String {
    let mut parts = vec!["git-profile".to_string()];
    for (flag, arg) in flags.iter().zip(args) {
        parts.push(flag.to_string());
        parts.push(escape(Cow::Borrowed(*arg)).into_owned());
    }
    parts.extend(flags.iter().skip(args.len()).map(|s| s.to_string()));
    parts.join(" ")
}
