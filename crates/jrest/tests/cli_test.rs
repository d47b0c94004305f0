//! Integration tests for the `jrest` binary.
//!
//! Argument parsing, inventory handling, and error/exit-code behavior,
//! all without a live device.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const INVENTORY: &str = r"
devices:
  - name: r1
    host: 127.0.0.1
    port: 1
    username: admin
    password: hunter2
";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `jrest` binary with env isolation.
fn jrest_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("jrest");
    cmd.env("HOME", "/tmp/jrest-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/jrest-cli-test-nonexistent")
        .env_remove("JREST_INVENTORY")
        .env_remove("JREST_OUTPUT")
        .env("NO_COLOR", "1");
    cmd
}

fn inventory_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(INVENTORY.as_bytes()).unwrap();
    file
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = jrest_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected exit code 2");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = format!("{stdout}{stderr}");
    assert!(text.contains("Usage"), "expected 'Usage' in output:\n{text}");
}

#[test]
fn completions_emit_a_script() {
    jrest_cmd()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("jrest"));
}

// ── Inventory ───────────────────────────────────────────────────────

#[test]
fn list_renders_devices_without_secrets() {
    let inventory = inventory_file();

    jrest_cmd()
        .arg("--inventory")
        .arg(inventory.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("r1"))
        .stdout(predicate::str::contains("127.0.0.1"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn list_json_redacts_the_password() {
    let inventory = inventory_file();

    jrest_cmd()
        .arg("--inventory")
        .arg(inventory.path())
        .arg("-o")
        .arg("json")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn missing_inventory_is_fatal() {
    jrest_cmd()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("inventory"));
}

// ── Configure ───────────────────────────────────────────────────────

#[test]
fn configure_rejects_invalid_json_with_usage_exit() {
    let inventory = inventory_file();

    jrest_cmd()
        .arg("--inventory")
        .arg(inventory.path())
        .arg("configure")
        .arg("-d")
        .arg("r1")
        .arg("-c")
        .arg("{not json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn configure_requires_a_payload() {
    let inventory = inventory_file();

    jrest_cmd()
        .arg("--inventory")
        .arg(inventory.path())
        .arg("configure")
        .arg("-d")
        .arg("r1")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no configuration given"));
}

#[test]
fn configure_unknown_device_exits_not_found() {
    let inventory = inventory_file();

    jrest_cmd()
        .arg("--inventory")
        .arg(inventory.path())
        .arg("configure")
        .arg("-d")
        .arg("nonexistent")
        .arg("-c")
        .arg("{}")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("nonexistent"));
}

#[test]
fn configure_unreachable_device_exits_connection_error() {
    // Port 1 on loopback: connection refused during the probe.
    let inventory = inventory_file();

    jrest_cmd()
        .arg("--inventory")
        .arg(inventory.path())
        .arg("configure")
        .arg("-d")
        .arg("r1")
        .arg("-c")
        .arg("{}")
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("127.0.0.1:1"));
}
