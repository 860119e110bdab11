//! Loop Runner - 固定周期主循环
//!
//! 每次迭代从 [`ModeSource`] 读取机器人状态，调用 [`LemonRobot::cycle`]，
//! 然后休眠到下一个周期截止时刻。
//!
//! # 定时
//!
//! - 截止时刻按 `start + n * period` 推进，避免误差累积
//! - 落后超过一个周期时不追赶，从当前时刻重新对齐
//! - `spin = true` 时使用 `spin_sleep` 获得更低抖动（占用更多 CPU）
//!
//! # 使用场景
//!
//! ```rust,no_run
//! use lemon_robot::{LemonRobot, RobotState};
//! use lemon_robot::loop_runner::{FixedMode, LoopConfig, run_robot};
//!
//! # fn example() -> Result<(), lemon_robot::RobotError> {
//! let mut robot = LemonRobot::builder().build()?;
//! let config = LoopConfig {
//!     max_iterations: Some(500), // 50Hz 下运行 10 秒
//!     ..LoopConfig::default()
//! };
//! let summary = run_robot(&mut robot, &mut FixedMode(RobotState::teleop()), &config)?;
//! println!("overruns: {}", summary.overruns);
//! # Ok(())
//! # }
//! ```

use crate::error::RobotError;
use crate::robot::LemonRobot;
use crate::state::RobotState;
use spin_sleep::SpinSleeper;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// 每周期的机器人状态来源（Driver Station 的替身）
pub trait ModeSource {
    /// 返回第 `iteration` 次迭代的状态
    fn poll(&mut self, iteration: u64) -> RobotState;
}

impl<F> ModeSource for F
where
    F: FnMut(u64) -> RobotState,
{
    fn poll(&mut self, iteration: u64) -> RobotState {
        self(iteration)
    }
}

/// 恒定状态
#[derive(Debug, Clone, Copy)]
pub struct FixedMode(pub RobotState);

impl ModeSource for FixedMode {
    fn poll(&mut self, _iteration: u64) -> RobotState {
        self.0
    }
}

/// 按迭代次数分段的脚本状态
///
/// 依次保持每段状态指定的迭代次数，脚本结束后保持最后一段状态。
///
/// ```rust
/// use lemon_robot::RobotState;
/// use lemon_robot::loop_runner::{ModeSource, ScriptedMode};
///
/// let mut script = ScriptedMode::new()
///     .then(2, RobotState::autonomous_display())
///     .then(3, RobotState::autonomous());
/// assert_eq!(script.poll(1), RobotState::autonomous_display());
/// assert_eq!(script.poll(2), RobotState::autonomous());
/// assert_eq!(script.poll(99), RobotState::autonomous());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedMode {
    segments: Vec<(u64, RobotState)>,
}

impl ScriptedMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一段：保持 `iterations` 次 `state`
    #[must_use]
    pub fn then(mut self, iterations: u64, state: RobotState) -> Self {
        self.segments.push((iterations, state));
        self
    }

    /// 脚本总迭代次数
    pub fn total_iterations(&self) -> u64 {
        self.segments.iter().map(|(n, _)| n).sum()
    }
}

impl ModeSource for ScriptedMode {
    fn poll(&mut self, iteration: u64) -> RobotState {
        let mut end = 0;
        for (n, state) in &self.segments {
            end += n;
            if iteration < end {
                return *state;
            }
        }
        self.segments
            .last()
            .map(|(_, state)| *state)
            .unwrap_or_default()
    }
}

/// 主循环配置
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// 最大迭代次数（None 表示无限循环）
    pub max_iterations: Option<u64>,

    /// 外部停止标志（如 Ctrl+C 处理器设置）
    pub stop: Option<Arc<AtomicBool>>,

    /// 是否使用 `spin_sleep`
    pub spin: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            max_iterations: None,
            stop: None,
            spin: true,
        }
    }
}

/// 主循环统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// 完成的迭代次数
    pub iterations: u64,
    /// 超时周期数
    pub overruns: u64,
    /// 被隔离的组件失败次数
    pub component_failures: u64,
}

/// 运行主循环
///
/// 阻塞直到：
/// - 达到 `max_iterations`
/// - 停止标志被设置
/// - `cycle` 返回错误（直接传播）
pub fn run_robot<S>(
    robot: &mut LemonRobot,
    source: &mut S,
    config: &LoopConfig,
) -> Result<LoopSummary, RobotError>
where
    S: ModeSource + ?Sized,
{
    let period = robot.period();
    if period.is_zero() {
        return Err(RobotError::InvalidConfig(
            "Loop period must be > 0".to_string(),
        ));
    }

    let sleeper = SpinSleeper::default();
    let mut summary = LoopSummary::default();
    let mut deadline = Instant::now() + period;

    tracing::info!(
        period_ms = period.as_secs_f64() * 1000.0,
        max_iterations = ?config.max_iterations,
        "Robot loop started"
    );

    loop {
        if let Some(max_iter) = config.max_iterations
            && summary.iterations >= max_iter
        {
            break;
        }
        if let Some(stop) = &config.stop
            && stop.load(Ordering::Relaxed)
        {
            tracing::info!("Stop requested");
            break;
        }

        let state = source.poll(summary.iterations);
        let report = robot.cycle(state)?;

        summary.iterations += 1;
        if report.overrun {
            summary.overruns += 1;
        }
        summary.component_failures += report.component_failures.len() as u64;

        let now = Instant::now();
        if now < deadline {
            sleep(&sleeper, config.spin, deadline - now);
            deadline += period;
        } else {
            // 落后：从当前时刻重新对齐
            deadline = now + period;
        }
    }

    tracing::info!(
        iterations = summary.iterations,
        overruns = summary.overruns,
        component_failures = summary.component_failures,
        "Robot loop finished"
    );
    Ok(summary)
}

fn sleep(sleeper: &SpinSleeper, spin: bool, duration: Duration) {
    if spin {
        sleeper.sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_config_default() {
        let config = LoopConfig::default();
        assert_eq!(config.max_iterations, None);
        assert!(config.stop.is_none());
        assert!(config.spin);
    }

    #[test]
    fn test_scripted_mode_segments() {
        let mut script = ScriptedMode::new()
            .then(1, RobotState::disabled())
            .then(2, RobotState::teleop());
        assert_eq!(script.total_iterations(), 3);
        assert_eq!(script.poll(0), RobotState::disabled());
        assert_eq!(script.poll(1), RobotState::teleop());
        assert_eq!(script.poll(2), RobotState::teleop());
        assert_eq!(script.poll(3), RobotState::teleop());
    }

    #[test]
    fn test_empty_script_is_disabled() {
        let mut script = ScriptedMode::new();
        assert_eq!(script.poll(0), RobotState::disabled());
    }

    #[test]
    fn test_closure_mode_source() {
        let mut source = |i: u64| {
            if i % 2 == 0 {
                RobotState::teleop()
            } else {
                RobotState::disabled()
            }
        };
        assert!(source.poll(0).enabled);
        assert!(!source.poll(1).enabled);
    }
}
