//! CLI 端到端测试

use assert_cmd::Command;
use predicates::prelude::*;

fn lemon_sim() -> Command {
    Command::cargo_bin("lemon-sim").unwrap()
}

#[test]
fn test_help() {
    lemon_sim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.toml");

    lemon_sim()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    // 已存在时拒绝覆盖
    lemon_sim()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure();

    lemon_sim()
        .args(["config", "show"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("20.0 ms"));
}

#[test]
fn test_run_teleop_cycles() {
    lemon_sim()
        .args(["run", "--mode", "teleop", "--cycles", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("周期数: 10"));
}

#[test]
fn test_run_with_profile() {
    lemon_sim()
        .args(["run", "--mode", "autonomous", "--cycles", "5", "--profile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Watchdog/ControlPeriod"));
}

#[test]
fn test_run_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "period_secs = -1.0").unwrap();

    lemon_sim()
        .args(["run", "--cycles", "1", "--config"])
        .arg(&path)
        .assert()
        .failure();
}
