use crate::common::{TestEnv, env, setup_snapshot_settings};
use insta_cmd::assert_cmd_snapshot;
use rstest::rstest;

#[rstest]
fn test_list_sorted_names(env: TestEnv) {
    env.write_profile("work.toml", "[user]\nemail = \"ada@work.example\"\n");
    env.write_profile("personal.toml", "[user]\nname = \"Ada\"\n");
    env.write_profile("legacy.tml", "[gpg]\nformat = \"openpgp\"\n");

    let settings = setup_snapshot_settings(&env);
    settings.bind(|| {
        let mut cmd = env.command();
        cmd.arg("--list");
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        legacy
        personal
        work

        ----- stderr -----
        ");
    });
}

#[rstest]
fn test_list_profiles_alias(env: TestEnv) {
    env.write_profile("work.toml", "");
    let output = env.command().arg("--profiles").output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "work\n");
}

#[rstest]
fn test_list_empty_directory(env: TestEnv) {
    let output = env.command().arg("--list").output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[rstest]
fn test_list_skips_other_files(env: TestEnv) {
    env.write_profile("work.toml", "");
    env.write_profile("README.md", "# my profiles\n");
    env.write_profile("work.toml~", "editor backup");
    std::fs::create_dir(env.profiles_dir().join("archive.toml")).unwrap();

    let output = env.command().arg("--list").output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "work\n");
}

#[rstest]
fn test_list_creates_default_directory(env: TestEnv) {
    let output = env
        .command()
        .env_remove("GIT_PROFILES_DIR")
        .arg("--list")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(
        env.home_path()
            .join(".config")
            .join("git-profile")
            .is_dir()
    );
}

#[rstest]
fn test_list_profiles_dir_flag_overrides_env(env: TestEnv) {
    let other = env.temp_path().join("other-profiles");
    std::fs::create_dir(&other).unwrap();
    std::fs::write(other.join("oss.toml"), "").unwrap();
    env.write_profile("work.toml", "");

    let output = env
        .command()
        .arg("--profiles-dir")
        .arg(&other)
        .arg("--list")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "oss\n");
}

#[rstest]
fn test_list_writes_nothing(env: TestEnv) {
    env.write_profile("work.toml", "[user]\nemail = \"ada@work.example\"\n");
    let output = env.command().arg("--list").output().unwrap();
    assert!(output.status.success());
    assert_eq!(env.local_config("user.email"), None);
}
