//! 配置文件读写测试

use lemon_robot::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
period_secs = 0.01
exception_policy = "propagate"

[watchdog]
profile = true
profile_period_secs = 0.5
"#
    )
    .unwrap();

    let config = RobotConfig::load(file.path()).unwrap();
    assert_eq!(config.period_secs, 0.01);
    assert_eq!(config.exception_policy, ExceptionPolicy::Propagate);
    assert!(config.watchdog.profile);
    assert_eq!(config.watchdog.profile_period_secs, 0.5);

    let robot = LemonRobot::builder().config(config).build().unwrap();
    assert_eq!(robot.get_period(), 0.01);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("robot.toml");

    let config = RobotConfig {
        period_secs: 0.005,
        ..RobotConfig::default()
    };
    config.save(&path).unwrap();

    assert_eq!(RobotConfig::load(&path).unwrap(), config);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RobotConfig::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, RobotError::Io(_)));
}

#[test]
fn test_load_malformed_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "period_secs = \"fast\"").unwrap();
    let err = RobotConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, RobotError::ConfigParse(_)));
}
