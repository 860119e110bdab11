//! 日志初始化
//!
//! 安装 `tracing` 全局订阅器（`RUST_LOG` 优先，否则使用默认指令），
//! 并把 `log` crate 的记录桥接到 `tracing`。

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// 日志初始化错误
#[derive(Error, Debug)]
pub enum LoggingError {
    /// 默认过滤指令无法解析
    #[error("Invalid log directive: {0}")]
    Directive(#[from] tracing_subscriber::filter::ParseError),

    /// `log` 桥接已安装
    #[error("Log bridge already installed: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),

    /// 全局订阅器已设置
    #[error("Global subscriber already set: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// 初始化日志
///
/// # 参数
///
/// - `default_directive`: 未设置 `RUST_LOG` 时使用的过滤指令，如 `"info"`、`"lemon_robot=debug"`
///
/// # 错误
///
/// 重复调用返回 `LoggingError::LogBridge` 或 `LoggingError::Subscriber`。
pub fn init_logging(default_directive: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)?,
    };

    tracing_log::LogTracer::init()?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_error_display() {
        let err = EnvFilter::try_new("lemon_robot=notalevel").unwrap_err();
        let msg = format!("{}", LoggingError::from(err));
        assert!(msg.contains("Invalid log directive"), "{msg}");
    }
}
