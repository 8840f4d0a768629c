use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("ipgeo")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_lookup_help_shows_json_flag() {
    cargo_bin_cmd!("ipgeo")
        .args(["lookup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("[IP]"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("ipgeo")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_interactive_mode_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("ipgeo")
        .env("IPGEO_HOME", dir.path())
        .env("SUPABASE_URL", "http://127.0.0.1:9")
        .env("SUPABASE_ANON_KEY", "anon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
