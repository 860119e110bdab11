//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use lemon_sdk::prelude::*;
//! ```

// 调度器
pub use lemon_robot::{CycleReport, LemonRobot, LemonRobotBuilder};

// 组件与钩子（常用 Trait）
pub use lemon_robot::{Component, ComponentSet, NoopHooks, RobotHooks, component_fn};

// 状态与配置
pub use lemon_robot::{CycleContext, ExceptionPolicy, RobotConfig, RobotState};

// 遥测
pub use lemon_robot::{Dashboard, MemoryDashboard, NullDashboard, fms_feedback};

// 主循环
pub use lemon_robot::{FixedMode, LoopConfig, ModeSource, ScriptedMode, run_robot};

// 错误类型
pub use lemon_robot::{ComponentError, RobotError};
