//! 组件系统
//!
//! 组件是外部框架定义的周期性单元，每个使能周期执行一次 `execute`。
//! 调度器只负责按注册顺序触发，不会重排或删除组件。
//!
//! # 使用示例
//!
//! ```rust
//! use lemon_robot::component::{Component, ComponentSet, component_fn};
//! use lemon_robot::ComponentError;
//!
//! struct Intake {
//!     speed: f64,
//! }
//!
//! impl Component for Intake {
//!     fn execute(&mut self) -> Result<(), ComponentError> {
//!         // 输出到电机
//!         Ok(())
//!     }
//!
//!     fn reset(&mut self) {
//!         // 每周期结束恢复默认输出
//!         self.speed = 0.0;
//!     }
//! }
//!
//! let mut components = ComponentSet::new();
//! components.add("intake", Intake { speed: 0.0 }).unwrap();
//! components.add("leds", component_fn(|| Ok(()))).unwrap();
//! assert_eq!(components.names().collect::<Vec<_>>(), ["intake", "leds"]);
//! ```

use crate::error::{ComponentError, RobotError};

/// 组件接口
///
/// 除 `execute` 外均有空默认实现。
pub trait Component: Send {
    /// 每个使能周期调用一次
    fn execute(&mut self) -> Result<(), ComponentError>;

    /// 机器人从未使能切换到使能时调用
    fn on_enable(&mut self) {}

    /// 机器人从使能切换到未使能时调用
    fn on_disable(&mut self) {}

    /// 每个使能周期所有组件执行完毕后调用，用于恢复每周期的默认值
    fn reset(&mut self) {}
}

/// 闭包组件
///
/// 通过 [`component_fn`] 创建。
pub struct FnComponent<F> {
    f: F,
}

/// 用闭包创建组件
pub fn component_fn<F>(f: F) -> FnComponent<F>
where
    F: FnMut() -> Result<(), ComponentError> + Send,
{
    FnComponent { f }
}

impl<F> Component for FnComponent<F>
where
    F: FnMut() -> Result<(), ComponentError> + Send,
{
    fn execute(&mut self) -> Result<(), ComponentError> {
        (self.f)()
    }
}

struct ComponentEntry {
    name: String,
    component: Box<dyn Component>,
}

/// 有序组件集合
///
/// 由集成方在构造机器人前填充；执行顺序即注册顺序。
#[derive(Default)]
pub struct ComponentSet {
    entries: Vec<ComponentEntry>,
}

impl ComponentSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 追加组件
    ///
    /// 名称用作看门狗 epoch 名和日志字段，必须唯一。
    pub fn add<C>(&mut self, name: impl Into<String>, component: C) -> Result<(), RobotError>
    where
        C: Component + 'static,
    {
        self.add_boxed(name, Box::new(component))
    }

    /// 追加已装箱的组件
    pub fn add_boxed(
        &mut self,
        name: impl Into<String>,
        component: Box<dyn Component>,
    ) -> Result<(), RobotError> {
        let name = name.into();
        if self.entries.iter().any(|e| e.name == name) {
            return Err(RobotError::DuplicateComponent(name));
        }
        self.entries.push(ComponentEntry { name, component });
        Ok(())
    }

    /// 按注册顺序返回组件名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Box<dyn Component>)> {
        self.entries
            .iter_mut()
            .map(|e| (e.name.as_str(), &mut e.component))
    }
}

impl std::fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
