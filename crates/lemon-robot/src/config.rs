//! # 机器人配置
//!
//! 循环周期、异常策略和看门狗剖析设置，可从 TOML 文件加载。
//!
//! ```toml
//! period_secs = 0.02
//! exception_policy = "auto"
//!
//! [watchdog]
//! profile = true
//! profile_period_secs = 0.25
//! ```

use crate::error::RobotError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 默认循环周期（50Hz）
pub const DEFAULT_PERIOD_SECS: f64 = 0.02;

/// 默认看门狗剖析发布间隔
pub const DEFAULT_PROFILE_PERIOD_SECS: f64 = 0.25;

/// 组件执行失败时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionPolicy {
    /// 立即中止本周期并返回错误
    Propagate,
    /// 记录日志、通知 `on_exception`，继续执行后续组件
    Isolate,
    /// 连接 FMS 时隔离，否则传播
    #[default]
    Auto,
}

impl ExceptionPolicy {
    /// 在给定 FMS 状态下是否隔离失败
    pub const fn isolates(self, fms_attached: bool) -> bool {
        match self {
            ExceptionPolicy::Propagate => false,
            ExceptionPolicy::Isolate => true,
            ExceptionPolicy::Auto => fms_attached,
        }
    }
}

/// 看门狗剖析设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    /// 是否向仪表盘发布各阶段耗时
    pub profile: bool,
    /// 发布间隔（秒）
    pub profile_period_secs: f64,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            profile: false,
            profile_period_secs: DEFAULT_PROFILE_PERIOD_SECS,
        }
    }
}

/// 机器人配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// 循环周期（秒）
    pub period_secs: f64,
    /// 组件失败处理策略
    pub exception_policy: ExceptionPolicy,
    /// 看门狗剖析
    pub watchdog: WatchdogConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            period_secs: DEFAULT_PERIOD_SECS,
            exception_policy: ExceptionPolicy::default(),
            watchdog: WatchdogConfig::default(),
        }
    }
}

impl RobotConfig {
    /// 校验配置
    ///
    /// 两个周期都必须能表示为 `Duration`，循环周期换算后不能为零。
    pub fn validate(&self) -> Result<(), RobotError> {
        let period = Duration::try_from_secs_f64(self.period_secs).map_err(|e| {
            RobotError::InvalidConfig(format!(
                "Invalid period_secs: {} ({e})",
                self.period_secs
            ))
        })?;
        if period.is_zero() {
            return Err(RobotError::InvalidConfig(format!(
                "Invalid period_secs: {} (must be > 0)",
                self.period_secs
            )));
        }
        if self.period_secs > 1.0 {
            tracing::warn!(
                "Very long loop period: {} s. Components will run below 1 Hz.",
                self.period_secs
            );
        }
        Duration::try_from_secs_f64(self.watchdog.profile_period_secs).map_err(|e| {
            RobotError::InvalidConfig(format!(
                "Invalid watchdog.profile_period_secs: {} ({e})",
                self.watchdog.profile_period_secs
            ))
        })?;
        Ok(())
    }

    /// 循环周期
    ///
    /// 仅在 `validate()` 通过后调用。
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(self.period_secs)
    }

    /// 看门狗剖析发布间隔
    pub fn profile_period(&self) -> Duration {
        Duration::from_secs_f64(self.watchdog.profile_period_secs)
    }

    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self, RobotError> {
        let config: RobotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String, RobotError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RobotError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded robot config");
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RobotError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RobotConfig::default();
        assert_eq!(config.period_secs, 0.02);
        assert_eq!(config.exception_policy, ExceptionPolicy::Auto);
        assert!(!config.watchdog.profile);
        assert_eq!(config.watchdog.profile_period_secs, 0.25);
        assert!(config.validate().is_ok());
        assert_eq!(config.period(), Duration::from_millis(20));
    }

    #[test]
    fn test_parse_partial_toml_fills_defaults() {
        let config = RobotConfig::from_toml_str(
            r#"
period_secs = 0.01

[watchdog]
profile = true
"#,
        )
        .unwrap();
        assert_eq!(config.period_secs, 0.01);
        assert_eq!(config.exception_policy, ExceptionPolicy::Auto);
        assert!(config.watchdog.profile);
        assert_eq!(config.watchdog.profile_period_secs, 0.25);
    }

    #[test]
    fn test_parse_exception_policy() {
        let config = RobotConfig::from_toml_str(r#"exception_policy = "isolate""#).unwrap();
        assert_eq!(config.exception_policy, ExceptionPolicy::Isolate);

        let err = RobotConfig::from_toml_str(r#"exception_policy = "ignore""#).unwrap_err();
        assert!(matches!(err, RobotError::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_non_positive_period() {
        for bad in [
            "period_secs = 0.0",
            "period_secs = -0.02",
            "period_secs = nan",
            "period_secs = 1e20",
            "period_secs = 1e-12",
        ] {
            let err = RobotConfig::from_toml_str(bad).unwrap_err();
            assert!(matches!(err, RobotError::InvalidConfig(_)), "{bad}");
        }
    }

    #[test]
    fn test_rejects_negative_profile_period() {
        let config = RobotConfig {
            watchdog: WatchdogConfig {
                profile: true,
                profile_period_secs: -1.0,
            },
            ..RobotConfig::default()
        };
        assert!(matches!(config.validate(), Err(RobotError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_overflowing_profile_period() {
        let err = RobotConfig::from_toml_str(
            r#"
[watchdog]
profile_period_secs = 1e20
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RobotError::InvalidConfig(_)));
    }

    #[test]
    fn test_exception_policy_isolates() {
        assert!(!ExceptionPolicy::Propagate.isolates(true));
        assert!(ExceptionPolicy::Isolate.isolates(false));
        assert!(ExceptionPolicy::Auto.isolates(true));
        assert!(!ExceptionPolicy::Auto.isolates(false));
    }

    #[test]
    fn test_toml_string_reparses() {
        let config = RobotConfig {
            period_secs: 0.005,
            exception_policy: ExceptionPolicy::Isolate,
            watchdog: WatchdogConfig {
                profile: true,
                profile_period_secs: 0.5,
            },
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("exception_policy = \"isolate\""));
        assert_eq!(RobotConfig::from_toml_str(&text).unwrap(), config);
    }
}
