//! 顶层导出测试
//!
//! 验证核心类型可以从 `lemon_sdk` 和 `lemon_sdk::prelude` 直接导入

use lemon_sdk::prelude::*;

struct Counter {
    ticks: u32,
}

impl RobotHooks for Counter {
    fn enabled_periodic(&mut self, _ctx: &CycleContext) {
        self.ticks += 1;
    }
}

#[test]
fn test_top_level_exports() {
    let _builder: lemon_sdk::LemonRobotBuilder = lemon_sdk::LemonRobot::builder();
    let _error: lemon_sdk::RobotError = lemon_sdk::RobotError::InvalidConfig("x".to_string());
    let _config: lemon_sdk::config::RobotConfig = lemon_sdk::RobotConfig::default();
    let _clock = lemon_sdk::clock::ManualClock::new();
}

#[test]
fn test_prelude_builds_and_runs_robot() -> anyhow::Result<()> {
    let mut robot = LemonRobot::builder()
        .hooks(Counter { ticks: 0 })
        .component("drive", component_fn(|| Ok(())))
        .build()?;

    let report = robot.cycle(RobotState::teleop())?;
    assert!(report.enabled_periodic_called);
    assert_eq!(report.components_executed, 1);
    Ok(())
}

#[test]
fn test_init_logging_twice_fails() {
    // 同一测试进程内只有第一次成功
    let first = lemon_sdk::init_logging("warn");
    let second = lemon_sdk::init_logging("warn");
    assert!(first.is_ok());
    assert!(second.is_err());
}
