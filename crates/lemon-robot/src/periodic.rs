//! 限频周期回调
//!
//! 在主循环之外需要更低频率执行的逻辑（如刷新仪表盘、检查电池电压）
//! 通过 `add_periodic` 注册，由调度器在每周期的收尾阶段检查是否到期。
//!
//! 到期条件：`now - last_run >= period`。`last_run` 初始化为注册时刻，
//! 因此首次执行发生在注册后一个完整周期。

use std::time::Duration;

/// 周期回调类型
pub type PeriodicCallback = Box<dyn FnMut() + Send>;

struct PeriodicEntry {
    name: String,
    callback: PeriodicCallback,
    period: Duration,
    last_run: Duration,
}

/// 周期回调调度器
#[derive(Default)]
pub struct PeriodicScheduler {
    entries: Vec<PeriodicEntry>,
}

impl PeriodicScheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 注册回调
    ///
    /// # 参数
    ///
    /// - `name`: 回调名（仅用于日志）
    /// - `period`: 最小执行间隔
    /// - `now`: 注册时刻
    pub fn add(
        &mut self,
        name: impl Into<String>,
        period: Duration,
        now: Duration,
        callback: PeriodicCallback,
    ) {
        self.entries.push(PeriodicEntry {
            name: name.into(),
            callback,
            period,
            last_run: now,
        });
    }

    /// 执行所有到期的回调，返回执行数量
    pub fn run_due(&mut self, now: Duration) -> usize {
        let mut ran = 0;
        for entry in &mut self.entries {
            if now.saturating_sub(entry.last_run) >= entry.period {
                entry.last_run = now;
                tracing::trace!(periodic = %entry.name, "running periodic callback");
                (entry.callback)();
                ran += 1;
            }
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按注册顺序返回回调名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
