//! 组件生命周期管理

use crate::errors::{BeanError, BoxError};
use std::any::Any;
use std::fmt;
use std::str::FromStr;

/// 构造过程中可变的 Bean 实例
pub type BeanInstance = dyn Any + Send + Sync;

/// Bean 作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BeanScope {
    /// 单例模式 - 容器生命周期内只创建一个实例
    #[default]
    Singleton,
    /// 原型模式 - 每次请求都创建新实例
    Prototype,
}

impl BeanScope {
    /// 作用域名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Prototype => "prototype",
        }
    }
}

impl fmt::Display for BeanScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeanScope {
    type Err = BeanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "singleton" => Ok(Self::Singleton),
            "prototype" => Ok(Self::Prototype),
            _ => Err(BeanError::invalid_descriptor(format!(
                "未知的作用域: {}",
                s
            ))),
        }
    }
}

/// Bean 生命周期状态
///
/// 状态严格按顺序推进，没有销毁状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    /// 已分配
    Allocated,
    /// 依赖已注入
    Injected,
    /// 名称已回调
    NameAssigned,
    /// 前置处理完成
    PreProcessed,
    /// 初始化完成
    Initialized,
    /// 后置处理完成
    PostProcessed,
    /// 可用
    Ready,
}

impl LifecycleState {
    /// 下一个状态，`Ready` 之后没有状态
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Allocated => Some(Self::Injected),
            Self::Injected => Some(Self::NameAssigned),
            Self::NameAssigned => Some(Self::PreProcessed),
            Self::PreProcessed => Some(Self::Initialized),
            Self::Initialized => Some(Self::PostProcessed),
            Self::PostProcessed => Some(Self::Ready),
            Self::Ready => None,
        }
    }
}

/// Bean 名称回调
pub trait BeanNameAware {
    /// 在依赖注入完成后、任何后置处理器之前调用
    fn set_bean_name(&mut self, name: &str);
}

/// 初始化回调
pub trait InitializingBean {
    /// 在前置处理之后、后置处理之前调用，失败会中止 Bean 创建
    fn after_properties_set(&mut self) -> Result<(), BoxError>;
}

/// Bean 后置处理器
///
/// 对每个 Bean 的初始化回调前后进行处理，只通过副作用生效。
pub trait BeanPostProcessor: Send + Sync {
    /// 初始化回调之前调用
    fn post_process_before_initialization(&self, _bean_name: &str, _bean: &mut BeanInstance) {}

    /// 初始化回调之后调用
    fn post_process_after_initialization(&self, _bean_name: &str, _bean: &mut BeanInstance) {}

    /// 处理器名称，用于日志
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
