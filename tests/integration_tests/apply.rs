use crate::common::{TestEnv, env, setup_snapshot_settings};
use insta_cmd::assert_cmd_snapshot;
use rstest::rstest;

const PERSONAL: &str = r#"
[user]
name = "Ada Lovelace"
email = "ada@home.example"
signingKey = "~/.ssh/id_ed25519.pub"

[commit]
gpgSign = true

[gpg]
format = "ssh"
"#;

#[rstest]
fn test_apply_full_profile(env: TestEnv) {
    env.write_profile("personal.toml", PERSONAL);

    let settings = setup_snapshot_settings(&env);
    settings.bind(|| {
        let mut cmd = env.command();
        cmd.args(["--profile", "personal"]);
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----

        ----- stderr -----
        ✓ Applied personal to local config (5 settings)
        ");
    });

    assert_eq!(env.local_config("user.name").as_deref(), Some("Ada Lovelace"));
    assert_eq!(
        env.local_config("user.email").as_deref(),
        Some("ada@home.example")
    );
    assert_eq!(
        env.local_config("user.signingkey").as_deref(),
        Some("~/.ssh/id_ed25519.pub")
    );
    assert_eq!(env.local_config("commit.gpgsign").as_deref(), Some("true"));
    assert_eq!(env.local_config("gpg.format").as_deref(), Some("ssh"));
}

#[rstest]
fn test_apply_only_gpg_format(env: TestEnv) {
    env.write_profile("ssh.toml", "[gpg]\nformat = \"ssh\"\n");

    let output = env.command().args(["--profile", "ssh"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("(1 setting)"));

    assert_eq!(env.local_config("gpg.format").as_deref(), Some("ssh"));
    // The global identity stays in effect; nothing else lands in .git/config
    assert_eq!(env.local_config("user.name"), None);
    assert_eq!(env.local_config("user.email"), None);
    assert_eq!(env.local_config("commit.gpgsign"), None);
}

#[rstest]
fn test_apply_gpg_sign_false_overrides_true(env: TestEnv) {
    env.run_git(&["config", "--local", "commit.gpgsign", "true"]);
    env.write_profile("unsigned.toml", "[commit]\ngpgSign = false\n");

    let output = env
        .command()
        .args(["--profile", "unsigned"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(env.local_config("commit.gpgsign").as_deref(), Some("false"));
}

#[rstest]
fn test_apply_empty_fields_leave_repo_alone(env: TestEnv) {
    env.run_git(&["config", "--local", "user.name", "Existing Name"]);
    env.write_profile(
        "work.toml",
        "[user]\nname = \"\"\nemail = \"ada@work.example\"\n[commit]\n",
    );

    let output = env.command().args(["--profile", "work"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        env.local_config("user.name").as_deref(),
        Some("Existing Name")
    );
    assert_eq!(
        env.local_config("user.email").as_deref(),
        Some("ada@work.example")
    );
    assert_eq!(env.local_config("commit.gpgsign"), None);
}

#[rstest]
fn test_apply_empty_profile(env: TestEnv) {
    env.write_profile("empty.toml", "");

    let settings = setup_snapshot_settings(&env);
    settings.bind(|| {
        let mut cmd = env.command();
        cmd.args(["--profile", "empty"]);
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----

        ----- stderr -----
        ○ Nothing to write for empty; local config unchanged
        ");
    });
}

#[rstest]
fn test_apply_layers_profiles(env: TestEnv) {
    env.write_profile("base.toml", PERSONAL);
    env.write_profile(
        "oss.toml",
        "[user]\nemail = \"ada@oss.example\"\n[commit]\ngpgSign = false\n",
    );

    let output = env
        .command()
        .args(["--profile", "base", "--set-profile", "oss"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Applied base + oss"));

    assert_eq!(env.local_config("user.name").as_deref(), Some("Ada Lovelace"));
    assert_eq!(
        env.local_config("user.email").as_deref(),
        Some("ada@oss.example")
    );
    assert_eq!(env.local_config("commit.gpgsign").as_deref(), Some("false"));
    assert_eq!(env.local_config("gpg.format").as_deref(), Some("ssh"));
}

#[rstest]
fn test_apply_with_directory_flag(env: TestEnv) {
    env.write_profile("work.toml", "[user]\nemail = \"ada@work.example\"\n");

    let output = env
        .command()
        .current_dir(env.temp_path())
        .arg("-C")
        .arg(env.root_path())
        .args(["--profile", "work"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        env.local_config("user.email").as_deref(),
        Some("ada@work.example")
    );
}

#[rstest]
fn test_apply_worktree_scope(env: TestEnv) {
    env.run_git(&["config", "--local", "extensions.worktreeConfig", "true"]);
    env.write_profile("work.toml", "[user]\nemail = \"ada@work.example\"\n");

    let output = env
        .command()
        .args(["--profile", "work", "--worktree"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("to worktree config"));

    assert_eq!(
        env.worktree_config("user.email").as_deref(),
        Some("ada@work.example")
    );
    assert_eq!(env.local_config("user.email"), None);
}

#[rstest]
fn test_show_prints_without_writing(env: TestEnv) {
    env.write_profile("personal.toml", PERSONAL);

    let output = env
        .command()
        .args(["--profile", "personal", "--show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[commit]\n\tgpgsign = true\n\
         [gpg]\n\tformat = ssh\n\
         [user]\n\tname = Ada Lovelace\n\temail = ada@home.example\n\
         \tsigningkey = ~/.ssh/id_ed25519.pub\n"
    );
    assert!(output.stderr.is_empty());

    assert_eq!(env.local_config("user.name"), None);
}
