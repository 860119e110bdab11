//! 调度层错误类型定义

use thiserror::Error;

/// 组件 `execute` 返回的错误
///
/// 组件由外部框架定义，错误类型不做约束，统一装箱。
pub type ComponentError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 调度层错误类型
#[derive(Error, Debug)]
pub enum RobotError {
    /// 组件执行失败（仅在 `ExceptionPolicy` 选择传播时返回）
    #[error("Component '{name}' failed: {source}")]
    Component {
        name: String,
        #[source]
        source: ComponentError,
    },

    /// 组件名称重复
    #[error("Duplicate component name: {0}")]
    DuplicateComponent(String),

    /// 配置无效（如周期 <= 0）
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// 配置文件解析错误
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// 配置序列化错误
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// IO 错误（读写配置文件）
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 RobotError 的 Display 实现
    #[test]
    fn test_robot_error_display() {
        let err = RobotError::Component {
            name: "drivetrain".to_string(),
            source: "motor stalled".into(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("drivetrain") && msg.contains("motor stalled"));

        let err = RobotError::DuplicateComponent("intake".to_string());
        assert_eq!(format!("{}", err), "Duplicate component name: intake");

        let err = RobotError::InvalidConfig("period_secs must be > 0".to_string());
        assert!(format!("{}", err).contains("period_secs"));
    }

    #[test]
    fn test_component_error_source() {
        use std::error::Error;

        let err = RobotError::Component {
            name: "shooter".to_string(),
            source: "flywheel encoder missing".into(),
        };
        let source = err.source().expect("component error should carry a source");
        assert_eq!(source.to_string(), "flywheel encoder missing");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "robot.toml");
        let err: RobotError = io.into();
        assert!(matches!(err, RobotError::Io(_)));
    }
}
