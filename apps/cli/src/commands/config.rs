//! 配置管理命令
//!
//! 生成和检查机器人 TOML 配置文件

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use lemon_sdk::RobotConfig;
use std::path::PathBuf;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 写入默认配置
    Init {
        /// 配置文件路径
        path: PathBuf,

        /// 覆盖已存在的文件
        #[arg(long)]
        force: bool,
    },

    /// 解析、校验并打印配置
    Show {
        /// 配置文件路径
        path: PathBuf,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Init { path, force } => Self::init_(path, force),
            ConfigCommand::Show { path } => Self::show_(path),
        }
    }

    fn init_(path: PathBuf, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "配置文件已存在: {}（使用 --force 覆盖）",
                path.display()
            );
        }

        RobotConfig::default()
            .save(&path)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))?;
        println!("✅ 已写入默认配置: {}", path.display());
        Ok(())
    }

    fn show_(path: PathBuf) -> Result<()> {
        let config = RobotConfig::load(&path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;

        println!("📋 配置: {}", path.display());
        println!("  循环周期: {:.1} ms", config.period_secs * 1000.0);
        println!("  异常策略: {:?}", config.exception_policy);
        println!(
            "  看门狗剖析: {}（间隔 {:.2} 秒）",
            if config.watchdog.profile { "开启" } else { "关闭" },
            config.watchdog.profile_period_secs
        );
        Ok(())
    }
}
