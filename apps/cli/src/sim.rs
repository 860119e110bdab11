//! 演示机器人
//!
//! 一个一维底盘：自动模式驶向 3 米目标，手动模式以固定速度前进。
//! 底盘速度指令每周期由钩子写入、由组件积分，周期结束后 `reset` 清零。

use lemon_sdk::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;

/// 自动模式目标距离（米）
pub const AUTO_TARGET_METERS: f64 = 3.0;
/// 自动模式速度（米/秒）
const AUTO_SPEED: f64 = 1.0;
/// 手动模式速度（米/秒），代替摇杆输入
const TELEOP_SPEED: f64 = 0.5;

/// 底盘状态
#[derive(Debug, Default, Clone, Copy)]
pub struct DriveState {
    /// 本周期速度指令
    pub speed_cmd: f64,
    /// 累计位置（米）
    pub position: f64,
}

pub type SharedDrive = Arc<Mutex<DriveState>>;

/// 仿真底盘组件
pub struct SimDrivetrain {
    state: SharedDrive,
    dt: f64,
}

impl Component for SimDrivetrain {
    fn execute(&mut self) -> Result<(), ComponentError> {
        let mut s = self.state.lock();
        if !s.speed_cmd.is_finite() {
            return Err(format!("invalid speed command: {}", s.speed_cmd).into());
        }
        s.position += s.speed_cmd * self.dt;
        Ok(())
    }

    fn on_disable(&mut self) {
        self.state.lock().speed_cmd = 0.0;
    }

    fn reset(&mut self) {
        self.state.lock().speed_cmd = 0.0;
    }
}

/// 位置遥测组件
pub struct DriveTelemetry {
    state: SharedDrive,
    dashboard: Arc<dyn Dashboard>,
}

impl Component for DriveTelemetry {
    fn execute(&mut self) -> Result<(), ComponentError> {
        let position = self.state.lock().position;
        self.dashboard.put_number("Drive/Position", position);
        Ok(())
    }
}

/// 演示钩子
pub struct DemoHooks {
    drive: SharedDrive,
    dashboard: Arc<dyn Dashboard>,
}

impl RobotHooks for DemoHooks {
    fn autonomous_periodic(&mut self, ctx: &CycleContext) {
        let mut drive = self.drive.lock();
        let remaining = (AUTO_TARGET_METERS - drive.position).max(0.0);
        if ctx.display_only() {
            // 未使能：只预览剩余轨迹
            self.dashboard.put_number("Auto/PreviewRemaining", remaining);
            return;
        }
        if remaining > 0.0 {
            drive.speed_cmd = AUTO_SPEED;
        }
    }

    fn enabled_periodic(&mut self, ctx: &CycleContext) {
        let mut drive = self.drive.lock();
        if !ctx.state.autonomous {
            drive.speed_cmd = TELEOP_SPEED;
        }
        let speed = drive.speed_cmd;
        self.dashboard
            .put_number("Drive/Speed", fms_feedback(&ctx.state, || speed));
    }

    fn on_enable(&mut self, ctx: &CycleContext) {
        tracing::info!(
            autonomous = ctx.state.autonomous,
            cycle = ctx.cycle,
            "Demo robot enabled"
        );
    }

    fn on_exception(&mut self, component: &str, error: &ComponentError) {
        tracing::warn!(component, %error, "Demo component failed, continuing");
    }
}

/// 构建演示机器人
pub fn build_robot(
    config: RobotConfig,
    dashboard: Arc<dyn Dashboard>,
) -> Result<(LemonRobot, SharedDrive), RobotError> {
    let drive: SharedDrive = Arc::new(Mutex::new(DriveState::default()));
    let dt = config.period_secs;

    let robot = LemonRobot::builder()
        .config(config)
        .dashboard(dashboard.clone())
        .hooks(DemoHooks {
            drive: drive.clone(),
            dashboard: dashboard.clone(),
        })
        .component(
            "drivetrain",
            SimDrivetrain {
                state: drive.clone(),
                dt,
            },
        )
        .component(
            "telemetry",
            DriveTelemetry {
                state: drive.clone(),
                dashboard,
            },
        )
        .build()?;

    Ok((robot, drive))
}
