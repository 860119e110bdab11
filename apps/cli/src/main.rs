//! # Lemon Sim
//!
//! 在桌面上运行带演示组件的 LemonRobot，用于验证钩子顺序、剖析输出和配置文件。
//!
//! ```bash
//! # 生成默认配置
//! lemon-sim config init robot.toml
//!
//! # 完整比赛流程：预览 -> 自动 -> 手动
//! lemon-sim run --mode match --config robot.toml --profile
//!
//! # 仅手动模式，运行 100 个周期
//! lemon-sim run --mode teleop --cycles 100
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod sim;

use commands::{ConfigCommand, RunCommand};

/// Lemon Sim - 机器人周期调度仿真工具
#[derive(Parser, Debug)]
#[command(name = "lemon-sim")]
#[command(about = "Command-line simulator for LemonRobot programs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 运行仿真机器人
    Run {
        #[command(flatten)]
        args: RunCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    lemon_sdk::init_logging("lemon_sim=info,lemon_robot=info")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),
        Commands::Run { args } => args.execute(),
    }
}
