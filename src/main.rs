use std::path::PathBuf;
use std::process;

use clap::Parser;
use color_print::cformat;
use git_profile::apply::{apply, plan_changes, plan_profile};
use git_profile::config::{ProfilesDir, Settings};
use git_profile::error::ProfileError;
use git_profile::git::Repository;
use git_profile::merge::Merge;
use git_profile::profile::ProfileStore;
use git_profile::styling::{eprintln, error_message, info_message, print, println, success_message};

mod cli;

use cli::Cli;

/// Log level from `-v` count; `RUST_LOG` takes precedence when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<ProfileError>() {
            Some(profile_err) => eprintln!("{profile_err}"),
            None => eprintln!("{}", error_message(format!("{err:#}"))),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings {
        profiles_dir: ProfilesDir::from_env(cli.profiles_dir.as_deref())?,
        scope: cli.scope(),
        repo_path: cli.directory.clone().unwrap_or_else(|| PathBuf::from(".")),
    };
    log::debug!(
        "Profile directory: {} (from {})",
        settings.profiles_dir.path.display(),
        settings.profiles_dir.source
    );

    settings.profiles_dir.ensure_exists()?;
    let store = ProfileStore::scan(&settings.profiles_dir.path)?;

    if cli.list {
        for name in store.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let profile = store.select(&cli.profile)?;
    let label = cli.profile.join(" + ");
    let scope = settings.scope;
    let mut repo = Repository::at(&settings.repo_path);

    let writes = if cli.merge {
        let before = repo.read_config(scope)?;
        let after = before.merge_with(&profile.to_git_config());
        if cli.show {
            print!("{}", after.render());
            return Ok(());
        }
        plan_changes(&before.raw, &after.raw)
    } else {
        if cli.show {
            print!("{}", profile.to_git_config().render());
            return Ok(());
        }
        plan_profile(&profile)
    };

    if writes.is_empty() {
        eprintln!(
            "{}",
            info_message(cformat!(
                "Nothing to write for <bold>{label}</>; {scope} config unchanged"
            ))
        );
        return Ok(());
    }

    let count = apply(&writes, scope, &mut repo)?;
    let noun = if count == 1 { "setting" } else { "settings" };
    eprintln!(
        "{}",
        success_message(cformat!(
            "Applied <bold>{label}</> to {scope} config ({count} {noun})"
        ))
    );
    Ok(())
}
