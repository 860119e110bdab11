//! 循环剖析：超时统计与看门狗耗时发布
//!
//! 每个周期收尾时调用 [`LoopProfiler::observe`]：
//! - 耗时超过周期即计为一次超时，并保存该周期的各阶段耗时
//! - 启用剖析且未连接 FMS 时，按 `profile_period` 限频向仪表盘发布
//!
//! # 发布的键
//!
//! | 键 | 含义 |
//! |----|------|
//! | `Watchdog Epochs/<阶段>` | 各阶段耗时（秒） |
//! | `Watchdog Epochs/Total` | 周期总耗时 |
//! | `Watchdog Epochs/Max`, `MaxKey` | 最慢阶段 |
//! | `Watchdog/LoopTime`, `ControlPeriod` | 当前耗时与配置周期 |
//! | `Watchdog/Overrun`, `OverrunCount` | 超时标志与累计次数 |
//! | `Watchdog LastOverrun/...` | 最近一次超时的各阶段耗时 |

use crate::dashboard::Dashboard;
use crate::watchdog::{Epoch, Watchdog};
use std::time::Duration;

/// 单周期剖析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileOutcome {
    /// 本周期是否超时
    pub overrun: bool,
    /// 本周期是否发布了剖析数据
    pub published: bool,
}

/// 循环剖析器
#[derive(Debug)]
pub struct LoopProfiler {
    enabled: bool,
    profile_period: Duration,
    last_publish: Option<Duration>,
    overrun_count: u64,
    last_overrun_epochs: Vec<Epoch>,
}

impl LoopProfiler {
    pub fn new(enabled: bool, profile_period: Duration) -> Self {
        Self {
            enabled,
            profile_period,
            last_publish: None,
            overrun_count: 0,
            last_overrun_epochs: Vec::new(),
        }
    }

    /// 检查超时并按需发布
    ///
    /// # 参数
    ///
    /// - `watchdog`: 本周期看门狗
    /// - `now`: 当前时刻（用于发布限频）
    /// - `low_bandwidth`: 连接 FMS 时为 true，跳过发布
    pub fn observe(
        &mut self,
        watchdog: &Watchdog,
        now: Duration,
        low_bandwidth: bool,
        dashboard: &dyn Dashboard,
    ) -> ProfileOutcome {
        let elapsed = watchdog.elapsed();
        let overrun = elapsed > watchdog.timeout();
        if overrun {
            self.overrun_count += 1;
            self.last_overrun_epochs = watchdog.epochs();
            tracing::warn!(
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                period_ms = watchdog.timeout().as_secs_f64() * 1000.0,
                overrun_count = self.overrun_count,
                "Loop overrun"
            );
        }

        let published = self.enabled && !low_bandwidth && self.due(now);
        if published {
            self.last_publish = Some(now);
            self.publish(watchdog, overrun, dashboard);
        }

        ProfileOutcome { overrun, published }
    }

    /// 首个周期即发布，之后按 `profile_period` 限速
    fn due(&self, now: Duration) -> bool {
        match self.last_publish {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.profile_period,
        }
    }

    fn publish(&self, watchdog: &Watchdog, overrun: bool, dashboard: &dyn Dashboard) {
        let mut max_epoch = 0.0;
        let mut max_key = String::new();
        for epoch in watchdog.epochs() {
            let secs = epoch.duration.as_secs_f64();
            if secs > max_epoch {
                max_epoch = secs;
                max_key = epoch.name.clone();
            }
            dashboard.put_number(&format!("Watchdog Epochs/{}", epoch.name), secs);
        }

        let total = watchdog.elapsed().as_secs_f64();
        dashboard.put_number("Watchdog Epochs/Total", total);
        dashboard.put_number("Watchdog Epochs/Max", max_epoch);
        dashboard.put_string("Watchdog Epochs/MaxKey", &max_key);

        dashboard.put_number("Watchdog/LoopTime", total);
        dashboard.put_number("Watchdog/ControlPeriod", watchdog.timeout().as_secs_f64());
        dashboard.put_boolean("Watchdog/Overrun", overrun);
        dashboard.put_number("Watchdog/OverrunCount", self.overrun_count as f64);

        if !self.last_overrun_epochs.is_empty() {
            let mut max = 0.0_f64;
            let mut sum = 0.0;
            for epoch in &self.last_overrun_epochs {
                let secs = epoch.duration.as_secs_f64();
                max = max.max(secs);
                sum += secs;
                dashboard.put_number(&format!("Watchdog LastOverrun/{}", epoch.name), secs);
            }
            dashboard.put_number("Watchdog LastOverrun/Max", max);
            dashboard.put_number("Watchdog LastOverrun/Total", sum);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn overrun_count(&self) -> u64 {
        self.overrun_count
    }

    /// 最近一次超时周期的各阶段耗时
    pub fn last_overrun_epochs(&self) -> &[Epoch] {
        &self.last_overrun_epochs
    }
}
