use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{ArgAction, Parser};
use git_profile::git::ConfigScope;

/// Custom styles for help output
fn help_styles() -> Styles {
    Styles::styled()
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .usage(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
}

#[derive(Parser, Debug)]
#[command(name = "git-profile")]
#[command(about = "Apply named git identity profiles to a repository", long_about = None)]
#[command(version)]
#[command(styles = help_styles())]
#[command(arg_required_else_help = true)]
#[command(group(
    clap::ArgGroup::new("action")
        .required(true)
        .args(["profile", "list"])
))]
#[command(after_long_help = "\
Profiles are TOML files in the profile directory ($GIT_PROFILES_DIR, or
~/.config/git-profile by default):

  [user]
  name = \"Ada Lovelace\"
  email = \"ada@example.com\"
  signingKey = \"~/.ssh/id_ed25519.pub\"

  [commit]
  gpgSign = true

  [gpg]
  format = \"ssh\"

Examples

  git-profile --list                       # Show available profiles
  git-profile --profile work               # Apply work.toml to this repository
  git-profile --profile base --profile oss # Layer two profiles, oss winning
  git-profile --profile work --worktree    # Apply to this worktree only")]
pub(crate) struct Cli {
    /// Profile to apply; repeat to layer several, later ones winning
    #[arg(
        long,
        visible_alias = "set-profile",
        value_name = "name",
        action = ArgAction::Append
    )]
    pub profile: Vec<String>,

    /// List available profiles
    #[arg(long, visible_alias = "profiles", conflicts_with_all = ["merge", "show"])]
    pub list: bool,

    /// Write to the per-worktree config instead of the repository config
    #[arg(long, conflicts_with = "local")]
    pub worktree: bool,

    /// Write to the repository config (default)
    #[arg(long)]
    pub local: bool,

    /// Merge into the existing config and write only what changes
    #[arg(long)]
    pub merge: bool,

    /// Print the resulting config instead of writing it
    #[arg(long)]
    pub show: bool,

    /// Profile directory (overrides $GIT_PROFILES_DIR)
    #[arg(long, value_name = "path", help_heading = "Global Options")]
    pub profiles_dir: Option<PathBuf>,

    /// Repository to configure
    #[arg(short = 'C', value_name = "path", help_heading = "Global Options")]
    pub directory: Option<PathBuf>,

    /// Show progress (-v), or also every git command (-vv)
    #[arg(
        long,
        short = 'v',
        action = ArgAction::Count,
        help_heading = "Global Options"
    )]
    pub verbose: u8,
}

impl Cli {
    pub fn scope(&self) -> ConfigScope {
        if self.worktree {
            ConfigScope::Worktree
        } else {
            ConfigScope::Local
        }
    }
}
