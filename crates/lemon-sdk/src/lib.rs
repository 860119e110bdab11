//! Lemon SDK - 组件化机器人程序开发包
//!
//! 对 [`lemon_robot`] 的统一门面，附带日志初始化。
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use lemon_sdk::prelude::*;
//!
//! struct Auto;
//!
//! impl RobotHooks for Auto {
//!     fn autonomous_periodic(&mut self, ctx: &CycleContext) {
//!         if !ctx.display_only() {
//!             // 按轨迹输出
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     lemon_sdk::init_logging("info")?;
//!
//!     let mut robot = LemonRobot::builder()
//!         .hooks(Auto)
//!         .component("drive", component_fn(|| Ok(())))
//!         .build()?;
//!
//!     let config = LoopConfig::default();
//!     run_robot(&mut robot, &mut FixedMode(RobotState::autonomous()), &config)?;
//!     Ok(())
//! }
//! ```

mod logging;
pub mod prelude;

// 按模块路径访问底层
pub use lemon_robot::{
    clock, component, config, dashboard, hooks, loop_runner, periodic, profiler, robot, state,
    watchdog,
};

// 常用类型
pub use lemon_robot::{
    Component, ComponentError, ComponentSet, CycleContext, CycleReport, Dashboard,
    ExceptionPolicy, LemonRobot, LemonRobotBuilder, RobotConfig, RobotError, RobotHooks,
    RobotState,
};

pub use logging::{LoggingError, init_logging};
