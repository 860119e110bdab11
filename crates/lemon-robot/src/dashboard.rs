//! 仪表盘遥测
//!
//! 以 `/` 分隔的层级键发布数值、布尔和字符串，供看门狗性能剖析和用户组件使用。
//! 键首尾的 `/` 会被去除，`"/Watchdog/LoopTime/"` 与 `"Watchdog/LoopTime"` 是同一个键。
//!
//! # 实现
//!
//! - [`MemoryDashboard`]: 内存表，线程安全，适合仿真和测试
//! - [`NullDashboard`]: 丢弃所有写入

use crate::state::RobotState;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// 仪表盘值
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardValue {
    Number(f64),
    Boolean(bool),
    String(String),
}

/// 仪表盘接口
pub trait Dashboard: Send + Sync {
    /// 写入键值
    fn put(&self, key: &str, value: DashboardValue);

    /// 读取键值
    fn get(&self, key: &str) -> Option<DashboardValue>;

    fn put_number(&self, key: &str, value: f64) {
        self.put(key, DashboardValue::Number(value));
    }

    fn put_boolean(&self, key: &str, value: bool) {
        self.put(key, DashboardValue::Boolean(value));
    }

    fn put_string(&self, key: &str, value: &str) {
        self.put(key, DashboardValue::String(value.to_string()));
    }

    /// 读取数值，不存在或类型不符时返回 `default`
    fn get_number(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            Some(DashboardValue::Number(v)) => v,
            _ => default,
        }
    }

    fn get_boolean(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(DashboardValue::Boolean(v)) => v,
            _ => default,
        }
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(DashboardValue::String(v)) => v,
            _ => default.to_string(),
        }
    }
}

/// 规范化键：去除首尾 `/`
pub fn normalize_key(key: &str) -> &str {
    key.trim_matches('/')
}

/// 内存仪表盘
#[derive(Debug, Default)]
pub struct MemoryDashboard {
    entries: RwLock<BTreeMap<String, DashboardValue>>,
}

impl MemoryDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有键（字典序）
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// 以 `prefix` 开头的键值（字典序）
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<(String, DashboardValue)> {
        let prefix = normalize_key(prefix);
        self.entries
            .read()
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Dashboard for MemoryDashboard {
    fn put(&self, key: &str, value: DashboardValue) {
        self.entries
            .write()
            .insert(normalize_key(key).to_string(), value);
    }

    fn get(&self, key: &str) -> Option<DashboardValue> {
        self.entries.read().get(normalize_key(key)).cloned()
    }
}

/// 丢弃所有写入的仪表盘
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDashboard;

impl Dashboard for NullDashboard {
    fn put(&self, _key: &str, _value: DashboardValue) {}

    fn get(&self, _key: &str) -> Option<DashboardValue> {
        None
    }
}

/// FMS 感知的反馈值
///
/// 连接 FMS 时带宽受限，直接返回 `0.0` 而不计算反馈值。
pub fn fms_feedback<F>(state: &RobotState, f: F) -> f64
where
    F: FnOnce() -> f64,
{
    if state.fms_attached { 0.0 } else { f() }
}
