//! LemonRobot - 周期调度器
//!
//! 在外部主循环的每个周期中：
//!
//! 1. 重置看门狗，检测使能切换（触发 `on_enable` / `on_disable`）
//! 2. 自动模式：调用 `autonomous_periodic`（未使能时同样调用，用于轨迹预览）
//! 3. 使能：调用 `enabled_periodic`
//! 4. 使能：按注册顺序执行所有组件，然后调用各组件的 `reset`
//! 5. 收尾（每周期都执行）：到期的周期回调、超时检测、剖析发布、更新循环耗时
//!
//! 钩子总是在任何组件 `execute` 之前调用。
//!
//! # 示例
//!
//! ```rust
//! use lemon_robot::{LemonRobot, RobotConfig, RobotState, component_fn};
//!
//! let mut robot = LemonRobot::builder()
//!     .config(RobotConfig::default())
//!     .component("drive", component_fn(|| Ok(())))
//!     .build()
//!     .unwrap();
//!
//! let report = robot.cycle(RobotState::teleop()).unwrap();
//! assert!(report.enabled_periodic_called);
//! assert_eq!(report.components_executed, 1);
//! assert_eq!(robot.get_period(), 0.02);
//! ```

use crate::clock::{Clock, MonotonicClock};
use crate::component::{Component, ComponentSet};
use crate::config::RobotConfig;
use crate::dashboard::{Dashboard, NullDashboard};
use crate::error::RobotError;
use crate::hooks::{NoopHooks, RobotHooks};
use crate::periodic::PeriodicScheduler;
use crate::profiler::LoopProfiler;
use crate::state::{CycleContext, RobotState};
use crate::watchdog::{Epoch, Watchdog};
use std::sync::Arc;
use std::time::Duration;

/// 固定阶段名
pub mod epochs {
    pub const AUTONOMOUS_PERIODIC: &str = "autonomous_periodic";
    pub const ENABLED_PERIODIC: &str = "enabled_periodic";
    pub const PERIODICS: &str = "periodics";
    pub const WATCHDOG_PROFILE: &str = "watchdog_profile";
}

/// 单周期执行报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// 周期序号
    pub cycle: u64,
    pub autonomous_periodic_called: bool,
    pub enabled_periodic_called: bool,
    /// 调用 `execute` 的组件数（包括失败的）
    pub components_executed: usize,
    /// 被隔离的失败组件名
    pub component_failures: Vec<String>,
    /// 执行的周期回调数
    pub periodics_run: usize,
    /// 本周期是否超时
    pub overrun: bool,
    /// 本周期耗时
    pub elapsed: Duration,
}

/// 周期调度器
pub struct LemonRobot {
    config: RobotConfig,
    period: Duration,
    components: ComponentSet,
    hooks: Box<dyn RobotHooks>,
    periodics: PeriodicScheduler,
    watchdog: Watchdog,
    profiler: LoopProfiler,
    dashboard: Arc<dyn Dashboard>,
    clock: Arc<dyn Clock>,
    last_state: Option<RobotState>,
    loop_time: Duration,
    cycle_count: u64,
    component_failures_total: u64,
}

impl LemonRobot {
    pub fn builder() -> LemonRobotBuilder {
        LemonRobotBuilder::new()
    }

    /// 执行一个周期
    ///
    /// # 错误
    ///
    /// 组件失败且 `ExceptionPolicy` 选择传播时返回 `RobotError::Component`，
    /// 本周期剩余组件和收尾阶段不再执行。
    pub fn cycle(&mut self, state: RobotState) -> Result<CycleReport, RobotError> {
        self.watchdog.reset();

        let ctx = CycleContext {
            state,
            cycle: self.cycle_count,
            now: self.clock.now(),
            period: self.period,
        };
        self.cycle_count += 1;
        let mut report = CycleReport {
            cycle: ctx.cycle,
            ..CycleReport::default()
        };

        self.handle_transitions(&ctx);

        if state.autonomous {
            self.autonomous_periodic(&ctx);
            report.autonomous_periodic_called = true;
        }
        if state.enabled {
            self.enabled_periodic(&ctx);
            report.enabled_periodic_called = true;
        }

        self.run_components_and_periodics(&ctx, &mut report)?;
        Ok(report)
    }

    fn handle_transitions(&mut self, ctx: &CycleContext) {
        let was_enabled = self.last_state.is_some_and(|s| s.enabled);
        let enabled = ctx.state.enabled;

        if enabled && !was_enabled {
            tracing::info!(autonomous = ctx.state.autonomous, "Robot enabled");
            for (_, component) in self.components.iter_mut() {
                component.on_enable();
            }
            self.hooks.on_enable(ctx);
        } else if !enabled && was_enabled {
            tracing::info!("Robot disabled");
            for (_, component) in self.components.iter_mut() {
                component.on_disable();
            }
        }

        if let Some(last) = self.last_state
            && last.autonomous != ctx.state.autonomous
        {
            tracing::debug!(autonomous = ctx.state.autonomous, "Mode changed");
        }
        self.last_state = Some(ctx.state);
    }

    fn autonomous_periodic(&mut self, ctx: &CycleContext) {
        self.hooks.autonomous_periodic(ctx);
        self.watchdog.add_epoch(epochs::AUTONOMOUS_PERIODIC);
    }

    fn enabled_periodic(&mut self, ctx: &CycleContext) {
        self.hooks.enabled_periodic(ctx);
        self.watchdog.add_epoch(epochs::ENABLED_PERIODIC);
    }

    /// 执行组件（仅使能时）与收尾阶段
    fn run_components_and_periodics(
        &mut self,
        ctx: &CycleContext,
        report: &mut CycleReport,
    ) -> Result<(), RobotError> {
        if ctx.state.enabled {
            self.run_components(ctx, report)?;
        }
        self.do_periodics(ctx, report);
        Ok(())
    }

    fn run_components(
        &mut self,
        ctx: &CycleContext,
        report: &mut CycleReport,
    ) -> Result<(), RobotError> {
        let isolate = self
            .config
            .exception_policy
            .isolates(ctx.state.fms_attached);

        for (name, component) in self.components.iter_mut() {
            let result = component.execute();
            self.watchdog.add_epoch(name);
            report.components_executed += 1;

            if let Err(source) = result {
                self.component_failures_total += 1;
                if !isolate {
                    tracing::error!(component = name, error = %source, "Component execute failed, aborting cycle");
                    return Err(RobotError::Component {
                        name: name.to_string(),
                        source,
                    });
                }
                tracing::error!(component = name, error = %source, "Component execute failed");
                self.hooks.on_exception(name, &source);
                report.component_failures.push(name.to_string());
            }
        }

        for (_, component) in self.components.iter_mut() {
            component.reset();
        }
        Ok(())
    }

    fn do_periodics(&mut self, ctx: &CycleContext, report: &mut CycleReport) {
        report.periodics_run = self.periodics.run_due(self.clock.now());
        self.watchdog.add_epoch(epochs::PERIODICS);

        let outcome = self.profiler.observe(
            &self.watchdog,
            self.clock.now(),
            ctx.state.fms_attached,
            self.dashboard.as_ref(),
        );
        if self.profiler.is_enabled() {
            self.watchdog.add_epoch(epochs::WATCHDOG_PROFILE);
        }

        let elapsed = self.watchdog.elapsed();
        self.loop_time = elapsed.max(self.period);
        report.overrun = outcome.overrun;
        report.elapsed = elapsed;
    }

    /// 注册限频回调，每 `period` 最多执行一次
    pub fn add_periodic<F>(&mut self, name: impl Into<String>, period: Duration, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        let now = self.clock.now();
        self.periodics.add(name, period, now, Box::new(callback));
    }

    /// 配置的循环周期（秒），不受周期执行影响
    pub fn get_period(&self) -> f64 {
        self.config.period_secs
    }

    /// 配置的循环周期
    pub fn period(&self) -> Duration {
        self.period
    }

    /// 上一周期的实测循环耗时：`max(period, elapsed)`
    pub fn loop_time(&self) -> Duration {
        self.loop_time
    }

    pub fn overrun_count(&self) -> u64 {
        self.profiler.overrun_count()
    }

    /// 最近一次超时周期的各阶段耗时
    pub fn last_overrun_epochs(&self) -> &[Epoch] {
        self.profiler.last_overrun_epochs()
    }

    /// 上一周期是否连接 FMS
    pub fn low_bandwidth(&self) -> bool {
        self.last_state.is_some_and(|s| s.fms_attached)
    }

    /// 按执行顺序返回组件名
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.names()
    }

    /// 已执行周期数
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// 累计组件失败次数（包括被隔离的）
    pub fn component_failures_total(&self) -> u64 {
        self.component_failures_total
    }

    pub fn last_state(&self) -> Option<RobotState> {
        self.last_state
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn dashboard(&self) -> &Arc<dyn Dashboard> {
        &self.dashboard
    }
}

impl std::fmt::Debug for LemonRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemonRobot")
            .field("config", &self.config)
            .field("components", &self.components)
            .field("cycle_count", &self.cycle_count)
            .field("last_state", &self.last_state)
            .field("loop_time", &self.loop_time)
            .finish_non_exhaustive()
    }
}

/// LemonRobot 构建器
///
/// 组件、钩子、仪表盘和时钟都在构造时注入；未指定时使用空钩子、
/// [`NullDashboard`] 和 [`MonotonicClock`]。
pub struct LemonRobotBuilder {
    config: RobotConfig,
    components: ComponentSet,
    hooks: Option<Box<dyn RobotHooks>>,
    dashboard: Option<Arc<dyn Dashboard>>,
    clock: Option<Arc<dyn Clock>>,
    pending_error: Option<RobotError>,
}

impl LemonRobotBuilder {
    pub fn new() -> Self {
        Self {
            config: RobotConfig::default(),
            components: ComponentSet::new(),
            hooks: None,
            dashboard: None,
            clock: None,
            pending_error: None,
        }
    }

    pub fn config(mut self, config: RobotConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置循环周期（秒）
    pub fn period_secs(mut self, period_secs: f64) -> Self {
        self.config.period_secs = period_secs;
        self
    }

    /// 追加组件；重名错误延迟到 `build()` 返回
    pub fn component<C>(mut self, name: impl Into<String>, component: C) -> Self
    where
        C: Component + 'static,
    {
        if let Err(e) = self.components.add(name, component) {
            self.pending_error.get_or_insert(e);
        }
        self
    }

    /// 使用已构建的组件集合（替换之前添加的组件及其重名错误）
    pub fn components(mut self, components: ComponentSet) -> Self {
        self.components = components;
        self.pending_error = None;
        self
    }

    pub fn hooks<H>(mut self, hooks: H) -> Self
    where
        H: RobotHooks + 'static,
    {
        self.hooks = Some(Box::new(hooks));
        self
    }

    pub fn dashboard(mut self, dashboard: Arc<dyn Dashboard>) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<LemonRobot, RobotError> {
        if let Some(e) = self.pending_error {
            return Err(e);
        }
        self.config.validate()?;

        let period = self.config.period();
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));
        let watchdog = Watchdog::new(period, clock.clone());
        let profiler = LoopProfiler::new(self.config.watchdog.profile, self.config.profile_period());

        tracing::debug!(
            period_secs = self.config.period_secs,
            components = self.components.len(),
            "LemonRobot constructed"
        );

        Ok(LemonRobot {
            period,
            components: self.components,
            hooks: self.hooks.unwrap_or_else(|| Box::new(NoopHooks)),
            periodics: PeriodicScheduler::new(),
            watchdog,
            profiler,
            dashboard: self
                .dashboard
                .unwrap_or_else(|| Arc::new(NullDashboard)),
            clock,
            last_state: None,
            loop_time: period,
            cycle_count: 0,
            component_failures_total: 0,
            config: self.config,
        })
    }
}

impl Default for LemonRobotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
