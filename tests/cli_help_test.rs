// End-to-end checks of the ownership-handoff binary without a live node

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const NOMINEE_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

fn handoff(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ownership-handoff").unwrap();
    cmd.current_dir(dir.path())
        .env("RUST_LOG", "off")
        .env_remove("CURRENT_OWNER_PRIVATE_KEY")
        .env_remove("NEW_OWNER_PRIVATE_KEY");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transfer"))
        .stdout(predicate::str::contains("accept"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("init-config"));
}

#[test]
fn test_transfer_help_documents_fee_and_dry_run() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .args(["transfer", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--priority-fee"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--contract"));
}

#[test]
fn test_bare_invocation_runs_the_transfer() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CURRENT_OWNER_PRIVATE_KEY"));
}

#[test]
fn test_bare_invocation_connects_to_the_configured_node() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .env("CURRENT_OWNER_PRIVATE_KEY", OWNER_KEY)
        .env("NEW_OWNER_PRIVATE_KEY", NOMINEE_KEY)
        .env("OWNERSHIP_HANDOFF__NETWORK__RPC_URL", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Connecting to http://127.0.0.1:1"))
        .stdout(predicate::str::contains("OWNERSHIP TRANSFERRED").not());
}

#[test]
fn test_dry_run_transfer_prints_both_calls() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .args(["transfer", "--dry-run"])
        .env("CURRENT_OWNER_PRIVATE_KEY", OWNER_KEY)
        .env("NEW_OWNER_PRIVATE_KEY", NOMINEE_KEY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("OWNERSHIP TRANSFERRED"))
        .stdout(predicate::str::contains("setPendingOwner"))
        .stdout(predicate::str::contains("acceptOwnership"))
        .stdout(predicate::str::contains("100 gwei"));
}

#[test]
fn test_dry_run_json_report() {
    let dir = TempDir::new().unwrap();
    let output = handoff(&dir)
        .args(["transfer", "--dry-run", "--json", "--priority-fee", "2 gwei"])
        .env("CURRENT_OWNER_PRIVATE_KEY", OWNER_KEY)
        .env("NEW_OWNER_PRIVATE_KEY", NOMINEE_KEY)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["phase"], "Accepted");
    assert_eq!(report["nomination"]["method"], "setPendingOwner");
    assert_eq!(report["acceptance"]["method"], "acceptOwnership");
    assert_eq!(
        report["new_owner"]
            .as_str()
            .unwrap()
            .to_lowercase(),
        "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
    );
    assert_eq!(report["priority_fee"], 2_000_000_000u64);
}

#[test]
fn test_missing_key_fails_before_any_call() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .args(["transfer", "--dry-run"])
        .env("CURRENT_OWNER_PRIVATE_KEY", OWNER_KEY)
        .assert()
        .failure()
        .stdout(predicate::str::contains("setPendingOwner").not())
        .stderr(predicate::str::contains("NEW_OWNER_PRIVATE_KEY"));
}

#[test]
fn test_invalid_priority_fee_is_rejected() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .args(["transfer", "--dry-run", "--priority-fee", "fast"])
        .env("CURRENT_OWNER_PRIVATE_KEY", OWNER_KEY)
        .env("NEW_OWNER_PRIVATE_KEY", NOMINEE_KEY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid priority fee 'fast'"));
}

#[test]
fn test_init_config_writes_file_and_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    handoff(&dir)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ownership-handoff.toml"));

    let written = std::fs::read_to_string(dir.path().join("ownership-handoff.toml")).unwrap();
    assert!(written.contains("priority_fee = \"100 gwei\""));

    handoff(&dir)
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_file_in_working_directory_is_picked_up() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("ownership-handoff.toml"),
        "[fees]\npriority_fee = \"7 gwei\"\n\n[observability]\nlog_level = \"off\"\njson_logs = false\n",
    )
    .unwrap();

    handoff(&dir)
        .args(["transfer", "--dry-run"])
        .env("CURRENT_OWNER_PRIVATE_KEY", OWNER_KEY)
        .env("NEW_OWNER_PRIVATE_KEY", NOMINEE_KEY)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 gwei"));
}

#[test]
fn test_environment_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("ownership-handoff.toml"),
        "[fees]\npriority_fee = \"7 gwei\"\n",
    )
    .unwrap();

    handoff(&dir)
        .args(["transfer", "--dry-run"])
        .env("CURRENT_OWNER_PRIVATE_KEY", OWNER_KEY)
        .env("NEW_OWNER_PRIVATE_KEY", NOMINEE_KEY)
        .env("OWNERSHIP_HANDOFF__FEES__PRIORITY_FEE", "9 gwei")
        .assert()
        .success()
        .stdout(predicate::str::contains("9 gwei"))
        .stdout(predicate::str::contains("7 gwei").not());
}
