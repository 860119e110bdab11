//! run 命令
//!
//! 以固定周期运行演示机器人

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use lemon_sdk::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim;

/// 比赛阶段时长（秒）
const MATCH_PREVIEW_SECS: f64 = 1.0;
const MATCH_AUTO_SECS: f64 = 15.0;
const MATCH_TELEOP_SECS: f64 = 135.0;

/// 仿真模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SimMode {
    /// 使能的自动模式
    Autonomous,
    /// 使能的手动模式
    Teleop,
    /// 未使能
    Disabled,
    /// 完整比赛：预览 -> 自动 -> 手动
    Match,
}

/// 运行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 配置文件路径（缺省使用默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 仿真模式
    #[arg(short, long, value_enum, default_value_t = SimMode::Match)]
    pub mode: SimMode,

    /// 运行周期数（缺省：match 模式跑完整场，其他模式无限）
    #[arg(short = 'n', long)]
    pub cycles: Option<u64>,

    /// 开启看门狗剖析（覆盖配置）
    #[arg(long)]
    pub profile: bool,

    /// 模拟 FMS 连接
    #[arg(long)]
    pub fms: bool,
}

impl RunCommand {
    pub fn execute(&self) -> Result<()> {
        let mut config = match &self.config {
            Some(path) => RobotConfig::load(path)
                .with_context(|| format!("读取配置文件失败: {}", path.display()))?,
            None => RobotConfig::default(),
        };
        if self.profile {
            config.watchdog.profile = true;
        }
        config.validate()?;

        let script = self.script(config.period_secs);
        let max_iterations = self.cycles.or(match self.mode {
            SimMode::Match => Some(script.total_iterations()),
            _ => None,
        });

        let dashboard = Arc::new(MemoryDashboard::new());
        let (mut robot, drive) = sim::build_robot(config, dashboard.clone())?;

        let stop = Arc::new(AtomicBool::new(false));
        let stop_handler = stop.clone();
        ctrlc::set_handler(move || {
            stop_handler.store(true, Ordering::Relaxed);
        })
        .context("安装 Ctrl+C 处理器失败")?;

        println!(
            "🤖 运行模式: {:?}，周期 {:.1} ms",
            self.mode,
            robot.get_period() * 1000.0
        );

        let loop_config = LoopConfig {
            max_iterations,
            stop: Some(stop),
            ..LoopConfig::default()
        };
        let mut source = script;
        let summary = run_robot(&mut robot, &mut source, &loop_config)?;

        println!();
        println!("📊 运行结果:");
        println!("  周期数: {}", summary.iterations);
        println!("  超时: {}", summary.overruns);
        println!("  组件失败: {}", summary.component_failures);
        println!("  底盘位置: {:.3} m", drive.lock().position);
        println!("  循环耗时: {:.3} ms", robot.loop_time().as_secs_f64() * 1000.0);

        if robot.config().watchdog.profile {
            println!();
            println!("⏱️  看门狗剖析:");
            for (key, value) in dashboard.entries_with_prefix("Watchdog") {
                println!("  {key} = {value:?}");
            }
        }

        Ok(())
    }

    /// 根据模式生成状态脚本
    fn script(&self, period_secs: f64) -> ScriptedMode {
        let cycles = |secs: f64| (secs / period_secs).round() as u64;
        let fms = self.fms;

        match self.mode {
            SimMode::Autonomous => {
                ScriptedMode::new().then(1, RobotState::autonomous().with_fms(fms))
            },
            SimMode::Teleop => ScriptedMode::new().then(1, RobotState::teleop().with_fms(fms)),
            SimMode::Disabled => {
                ScriptedMode::new().then(1, RobotState::disabled().with_fms(fms))
            },
            SimMode::Match => ScriptedMode::new()
                .then(
                    cycles(MATCH_PREVIEW_SECS),
                    RobotState::autonomous_display().with_fms(fms),
                )
                .then(
                    cycles(MATCH_AUTO_SECS),
                    RobotState::autonomous().with_fms(fms),
                )
                .then(
                    cycles(MATCH_TELEOP_SECS),
                    RobotState::teleop().with_fms(fms),
                ),
        }
    }
}
