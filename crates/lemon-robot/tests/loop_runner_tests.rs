//! 主循环集成测试
//!
//! 使用 1ms 周期以缩短测试时间。

use lemon_robot::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

fn counting_robot(executed: &Arc<AtomicUsize>) -> LemonRobot {
    let executed = executed.clone();
    LemonRobot::builder()
        .period_secs(0.001)
        .component(
            "counter",
            component_fn(move || {
                executed.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }),
        )
        .build()
        .unwrap()
}

#[test]
fn test_runs_max_iterations() {
    let executed = Arc::new(AtomicUsize::new(0));
    let mut robot = counting_robot(&executed);

    let config = LoopConfig {
        max_iterations: Some(20),
        ..LoopConfig::default()
    };
    let start = Instant::now();
    let summary = run_robot(&mut robot, &mut FixedMode(RobotState::teleop()), &config).unwrap();

    assert_eq!(summary.iterations, 20);
    assert_eq!(summary.component_failures, 0);
    assert_eq!(executed.load(Ordering::Relaxed), 20);
    assert_eq!(robot.cycle_count(), 20);
    // 20 个 1ms 周期至少耗时约 19ms
    assert!(start.elapsed() >= Duration::from_millis(19));
}

#[test]
fn test_scripted_modes_gate_components() {
    let executed = Arc::new(AtomicUsize::new(0));
    let mut robot = counting_robot(&executed);

    let mut script = ScriptedMode::new()
        .then(5, RobotState::autonomous_display())
        .then(10, RobotState::autonomous())
        .then(5, RobotState::disabled());
    let config = LoopConfig {
        max_iterations: Some(script.total_iterations()),
        spin: false,
        ..LoopConfig::default()
    };
    let summary = run_robot(&mut robot, &mut script, &config).unwrap();

    assert_eq!(summary.iterations, 20);
    assert_eq!(executed.load(Ordering::Relaxed), 10);
    assert_eq!(robot.last_state(), Some(RobotState::disabled()));
}

#[test]
fn test_stop_flag_ends_loop() {
    let executed = Arc::new(AtomicUsize::new(0));
    let mut robot = counting_robot(&executed);

    let stop = Arc::new(AtomicBool::new(false));
    let stop_in_source = stop.clone();
    let mut source = move |i: u64| {
        if i == 7 {
            stop_in_source.store(true, Ordering::Relaxed);
        }
        RobotState::teleop()
    };

    let config = LoopConfig {
        max_iterations: Some(1000),
        stop: Some(stop),
        ..LoopConfig::default()
    };
    let summary = run_robot(&mut robot, &mut source, &config).unwrap();

    // 第 7 次迭代设置停止标志，该迭代仍完成
    assert_eq!(summary.iterations, 8);
}

#[test]
fn test_component_error_propagates_out_of_loop() {
    let mut robot = LemonRobot::builder()
        .config(RobotConfig {
            period_secs: 0.001,
            exception_policy: ExceptionPolicy::Propagate,
            ..RobotConfig::default()
        })
        .component("broken", component_fn(|| Err("encoder unplugged".into())))
        .build()
        .unwrap();

    let config = LoopConfig {
        max_iterations: Some(10),
        ..LoopConfig::default()
    };
    let err = run_robot(&mut robot, &mut FixedMode(RobotState::teleop()), &config).unwrap_err();
    assert!(matches!(err, RobotError::Component { ref name, .. } if name == "broken"));
    assert_eq!(robot.cycle_count(), 1);
}

#[test]
fn test_isolated_failures_counted() {
    let mut robot = LemonRobot::builder()
        .config(RobotConfig {
            period_secs: 0.001,
            exception_policy: ExceptionPolicy::Isolate,
            ..RobotConfig::default()
        })
        .component("broken", component_fn(|| Err("encoder unplugged".into())))
        .build()
        .unwrap();

    let config = LoopConfig {
        max_iterations: Some(5),
        ..LoopConfig::default()
    };
    let summary = run_robot(&mut robot, &mut FixedMode(RobotState::teleop()), &config).unwrap();
    assert_eq!(summary.iterations, 5);
    assert_eq!(summary.component_failures, 5);
}
