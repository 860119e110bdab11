//! 循环看门狗
//!
//! 记录单个周期内各阶段（epoch）的耗时，用于定位超时（overrun）来源。
//! 每个周期开始时 `reset()`，每完成一个阶段调用 `add_epoch(name)`。

use crate::clock::Clock;
use std::sync::Arc;
use std::time::Duration;

/// 单个阶段耗时
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epoch {
    /// 阶段名（组件名或固定阶段名）
    pub name: String,
    /// 距上一个阶段（或周期开始）的耗时
    pub duration: Duration,
}

/// 周期看门狗
pub struct Watchdog {
    timeout: Duration,
    start: Duration,
    // (阶段名, 绝对时刻)
    marks: Vec<(String, Duration)>,
    clock: Arc<dyn Clock>,
}

impl Watchdog {
    pub fn new(timeout: Duration, clock: Arc<dyn Clock>) -> Self {
        let start = clock.now();
        Self {
            timeout,
            start,
            marks: Vec::new(),
            clock,
        }
    }

    /// 开始新周期：清空阶段并重置起点
    pub fn reset(&mut self) {
        self.start = self.clock.now();
        self.marks.clear();
    }

    /// 记录阶段结束
    pub fn add_epoch(&mut self, name: impl Into<String>) {
        let now = self.clock.now();
        self.marks.push((name.into(), now));
    }

    /// 自周期开始以来的耗时
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.start)
    }

    /// 是否超过超时阈值
    pub fn is_expired(&self) -> bool {
        self.elapsed() > self.timeout
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 各阶段耗时（按记录顺序）
    pub fn epochs(&self) -> Vec<Epoch> {
        let mut prev = self.start;
        self.marks
            .iter()
            .map(|(name, at)| {
                let duration = at.saturating_sub(prev);
                prev = *at;
                Epoch {
                    name: name.clone(),
                    duration,
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for Watchdog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchdog")
            .field("timeout", &self.timeout)
            .field("start", &self.start)
            .field("marks", &self.marks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn watchdog(timeout_ms: u64) -> (Watchdog, ManualClock) {
        let clock = ManualClock::new();
        let wd = Watchdog::new(Duration::from_millis(timeout_ms), Arc::new(clock.clone()));
        (wd, clock)
    }

    #[test]
    fn test_epoch_durations_are_deltas() {
        let (mut wd, clock) = watchdog(20);
        wd.reset();

        clock.advance(Duration::from_millis(3));
        wd.add_epoch("drive");
        clock.advance(Duration::from_millis(5));
        wd.add_epoch("arm");

        let epochs = wd.epochs();
        assert_eq!(epochs.len(), 2);
        assert_eq!(epochs[0].name, "drive");
        assert_eq!(epochs[0].duration, Duration::from_millis(3));
        assert_eq!(epochs[1].name, "arm");
        assert_eq!(epochs[1].duration, Duration::from_millis(5));
        assert_eq!(wd.elapsed(), Duration::from_millis(8));
    }

    #[test]
    fn test_expired_only_when_strictly_over_timeout() {
        let (mut wd, clock) = watchdog(20);
        wd.reset();

        clock.advance(Duration::from_millis(20));
        assert!(!wd.is_expired());
        clock.advance(Duration::from_millis(1));
        assert!(wd.is_expired());
    }

    #[test]
    fn test_reset_clears_epochs() {
        let (mut wd, clock) = watchdog(20);
        clock.advance(Duration::from_millis(4));
        wd.add_epoch("x");
        wd.reset();

        assert!(wd.epochs().is_empty());
        assert_eq!(wd.elapsed(), Duration::ZERO);
    }
}
