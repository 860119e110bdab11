//! 用户钩子（Hook Contract）
//!
//! 机器人程序作者通过实现 [`RobotHooks`] 在每个周期插入自己的逻辑。
//! 所有方法都有空默认实现，只需覆盖关心的部分。
//!
//! # 调用时机
//!
//! - `autonomous_periodic`: 自动模式下每周期一次，**包括未使能时**（用于轨迹预览）
//! - `enabled_periodic`: 使能时每周期一次，不区分模式
//! - 两者都在任何组件 `execute` 之前调用
//!
//! # 示例
//!
//! ```rust
//! use lemon_robot::hooks::RobotHooks;
//! use lemon_robot::state::CycleContext;
//!
//! struct MyRobot {
//!     auto_ticks: u64,
//! }
//!
//! impl RobotHooks for MyRobot {
//!     fn autonomous_periodic(&mut self, ctx: &CycleContext) {
//!         if ctx.display_only() {
//!             // 未使能：只预览轨迹，不要驱动执行器
//!             return;
//!         }
//!         self.auto_ticks += 1;
//!     }
//! }
//! ```

use crate::error::ComponentError;
use crate::state::CycleContext;

/// 用户可覆盖的周期钩子
pub trait RobotHooks: Send {
    /// 自动模式下每周期调用（包括未使能）
    fn autonomous_periodic(&mut self, ctx: &CycleContext) {
        let _ = ctx;
    }

    /// 使能时每周期调用
    fn enabled_periodic(&mut self, ctx: &CycleContext) {
        let _ = ctx;
    }

    /// 从未使能切换到使能时调用，在组件的 `on_enable` 之后
    fn on_enable(&mut self, ctx: &CycleContext) {
        let _ = ctx;
    }

    /// 组件执行失败且被隔离时调用
    fn on_exception(&mut self, component: &str, error: &ComponentError) {
        let _ = (component, error);
    }
}

/// 空钩子
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl RobotHooks for NoopHooks {}
