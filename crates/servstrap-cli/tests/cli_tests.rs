//! Integration tests for the servstrap binary.
//!
//! Everything here must pass on a machine with no Python, no NSSM, and no
//! elevation: only the argument surface, dry runs, configuration handling,
//! and precondition failures are exercised.

use assert_cmd::Command;
use predicates::prelude::*;

fn servstrap() -> Command {
    Command::cargo_bin("servstrap").unwrap()
}

// ── surface ───────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    servstrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_matches_cargo() {
    servstrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn provision_help_shows_flags() {
    servstrap()
        .args(["provision", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--base"))
        .stdout(predicate::str::contains("--yes"));
}

#[test]
fn no_arguments_shows_help_and_fails() {
    servstrap().assert().failure().code(2);
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    servstrap().arg("conjure").assert().failure().code(2);
}

#[test]
fn quiet_and_verbose_conflict() {
    servstrap()
        .args(["--quiet", "--verbose", "status"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn completions_generate_for_bash() {
    servstrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("servstrap"));
}

// ── provision ─────────────────────────────────────────────────────────────────

#[test]
fn invalid_project_name_is_rejected_with_exit_two() {
    servstrap()
        .args(["provision", "bad/name", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn dry_run_prints_plan_and_touches_nothing() {
    let base = tempfile::tempdir().unwrap();

    servstrap()
        .args(["provision", "demo-svc", "--dry-run"])
        .arg("--base")
        .arg(base.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("demo-svc"))
        .stdout(predicate::str::contains("DemoSvc"));

    // The base directory was never written to.
    assert_eq!(std::fs::read_dir(base.path()).unwrap().count(), 0);
}

#[test]
fn dry_run_uses_configured_default_project() {
    let base = tempfile::tempdir().unwrap();

    servstrap()
        .args(["provision", "--dry-run"])
        .arg("--base")
        .arg(base.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("py-service"));
}

// ── status ────────────────────────────────────────────────────────────────────

#[test]
fn status_fails_fast_when_service_utility_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[tools]\nnssm = \"servstrap-missing-nssm-binary\"\n",
    )
    .unwrap();

    servstrap()
        .args(["status", "demo-svc"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("required tool not found"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_path_prints_a_location() {
    servstrap()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn config_list_shows_effective_values() {
    servstrap()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_dir"))
        .stdout(predicate::str::contains("nssm"));
}

#[test]
fn config_get_reads_a_key() {
    servstrap()
        .args(["config", "get", "tools.python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("python"));
}

#[test]
fn config_get_unknown_key_is_a_config_error() {
    servstrap()
        .args(["config", "get", "does.not.exist"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn malformed_config_file_exits_four() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "this is not toml =").unwrap();

    servstrap()
        .args(["status", "demo-svc"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(4);
}
