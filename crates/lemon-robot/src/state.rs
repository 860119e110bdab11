//! 机器人状态快照
//!
//! 每个周期由外部主循环提供一次 `RobotState`，调度器据此选择要调用的钩子。
//! 使能（enabled）与自动（autonomous）是两个正交的布尔量，不构成状态机。

use std::time::Duration;

/// 单个周期的机器人状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RobotState {
    /// 是否使能（允许执行器输出）
    pub enabled: bool,
    /// 是否处于自动模式（否则为手动/teleop）
    pub autonomous: bool,
    /// 是否连接 FMS（比赛场地管理系统），连接时遥测带宽受限
    pub fms_attached: bool,
}

impl RobotState {
    /// 未使能的手动模式
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            autonomous: false,
            fms_attached: false,
        }
    }

    /// 使能的手动模式
    pub const fn teleop() -> Self {
        Self {
            enabled: true,
            autonomous: false,
            fms_attached: false,
        }
    }

    /// 使能的自动模式
    pub const fn autonomous() -> Self {
        Self {
            enabled: true,
            autonomous: true,
            fms_attached: false,
        }
    }

    /// 未使能的自动模式（仅用于轨迹预览）
    pub const fn autonomous_display() -> Self {
        Self {
            enabled: false,
            autonomous: true,
            fms_attached: false,
        }
    }

    /// 设置 FMS 连接标志
    #[must_use]
    pub const fn with_fms(mut self, attached: bool) -> Self {
        self.fms_attached = attached;
        self
    }

    /// 自动模式但未使能：钩子只应预览，不应驱动执行器
    pub const fn is_display_only(&self) -> bool {
        self.autonomous && !self.enabled
    }
}

/// 传给用户钩子的周期上下文
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleContext {
    /// 本周期状态
    pub state: RobotState,
    /// 周期序号（从 0 开始）
    pub cycle: u64,
    /// 周期开始时刻（相对时钟原点）
    pub now: Duration,
    /// 配置的循环周期
    pub period: Duration,
}

impl CycleContext {
    /// 见 [`RobotState::is_display_only`]
    pub const fn display_only(&self) -> bool {
        self.state.is_display_only()
    }
}
