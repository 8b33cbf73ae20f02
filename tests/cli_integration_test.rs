//! Command-line behaviour of the `cimport` binary.

mod common;

use assert_cmd::Command;
use common::{read_lines, write_header};
use std::fs;
use tempfile::TempDir;

fn cimport(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cimport").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env_remove("CIMPORT_CONFIG");
    cmd
}

#[test]
fn test_translate_command() {
    let dir = TempDir::new().unwrap();
    let input = write_header(&dir, "add.h", "int add(int a, int b);\n");
    let output = dir.path().join("add.m");

    cimport(&dir)
        .arg("translate")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read_lines(&output), vec!["extern fun add(a: int, b: int) -> int"]);
}

#[test]
fn test_translate_uses_discovered_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".cimport.toml"), "[output]\nformat = \"json\"\n").unwrap();
    let input = write_header(&dir, "add.h", "int add(int a, int b);\n");
    let output = dir.path().join("add.jsonl");

    cimport(&dir)
        .arg("translate")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let line = fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(value["signature"]["name"], "add");
}

#[test]
fn test_strict_fails_on_skipped_declarations() {
    let dir = TempDir::new().unwrap();
    let input = write_header(&dir, "mixed.h", "float ratio(void);\nint count(void);\n");
    let output = dir.path().join("mixed.m");

    let assert = cimport(&dir)
        .arg("translate")
        .arg(&input)
        .arg(&output)
        .arg("--strict")
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("could not be translated"), "stderr: {stderr}");
    assert_eq!(read_lines(&output), vec!["extern fun count() -> int"]);
}

#[test]
fn test_non_strict_succeeds_on_skipped_declarations() {
    let dir = TempDir::new().unwrap();
    let input = write_header(&dir, "mixed.h", "float ratio(void);\nint count(void);\n");

    cimport(&dir)
        .arg("translate")
        .arg(&input)
        .arg(dir.path().join("mixed.m"))
        .assert()
        .success();
}

#[test]
fn test_inspect_prints_signatures() {
    let dir = TempDir::new().unwrap();
    let input = write_header(&dir, "log.h", "void log(const char *msg, ...);\n");

    let assert = cimport(&dir).arg("inspect").arg(&input).assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("extern fun log(msg: string, ...) -> ()"), "stdout: {stdout}");
    assert!(stdout.contains("1 of 1 function declaration(s) translated"));
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    cimport(&dir).arg("init").assert().success();
    assert!(dir.path().join(".cimport.toml").exists());

    cimport(&dir).arg("init").assert().failure();
    cimport(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn test_batch_command() {
    let dir = TempDir::new().unwrap();
    write_header(&dir, "include/a.h", "int one(void);\n");
    write_header(&dir, "include/b.h", "int two(void);\n");

    let assert = cimport(&dir)
        .args(["batch", "include", "out", "--jobs", "1"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("2 header(s), 2 signature(s)"), "stdout: {stdout}");
    assert_eq!(read_lines(&dir.path().join("out/a.m")), vec!["extern fun one() -> int"]);
}
