//! # Lemon Robot - 机器人周期调度器
//!
//! 在组件化机器人框架之上叠加周期调度：每个循环周期把 tick 路由到用户钩子，
//! 然后按注册顺序执行框架管理的组件。
//!
//! ## 模块
//!
//! - `robot` - 调度器 [`LemonRobot`] 与构建器
//! - `component` - 组件接口与有序集合
//! - `hooks` - 用户钩子接口
//! - `state` - 周期状态（使能 / 自动 / FMS）
//! - `periodic` - 限频周期回调
//! - `watchdog` / `profiler` - 阶段计时、超时统计与剖析发布
//! - `dashboard` - 遥测键值表
//! - `clock` - 可注入时钟
//! - `config` - TOML 配置
//! - `loop_runner` - 固定周期主循环

pub mod clock;
pub mod component;
pub mod config;
pub mod dashboard;
mod error;
pub mod hooks;
pub mod loop_runner;
pub mod periodic;
pub mod profiler;
pub mod robot;
pub mod state;
pub mod watchdog;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use component::{Component, ComponentSet, FnComponent, component_fn};
pub use config::{ExceptionPolicy, RobotConfig, WatchdogConfig};
pub use dashboard::{Dashboard, DashboardValue, MemoryDashboard, NullDashboard, fms_feedback};
pub use error::{ComponentError, RobotError};
pub use hooks::{NoopHooks, RobotHooks};
pub use loop_runner::{FixedMode, LoopConfig, LoopSummary, ModeSource, ScriptedMode, run_robot};
pub use robot::{CycleReport, LemonRobot, LemonRobotBuilder};
pub use state::{CycleContext, RobotState};
pub use watchdog::{Epoch, Watchdog};
