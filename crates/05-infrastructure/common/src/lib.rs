//! # IoC Common
//!
//! 这个 crate 提供了 Lorn IoC 容器的公共元数据、能力 trait 和错误类型。
//!
//! ## 核心组件
//!
//! - [`ComponentDescriptor`] - 组件描述符及其构建器
//! - [`BeanScope`] / [`LifecycleState`] - 作用域和生命周期状态
//! - [`BeanNameAware`] / [`InitializingBean`] / [`BeanPostProcessor`] - 生命周期回调
//! - [`ContainerConfig`] - 容器配置
//! - [`submit_component`] / [`catalog_entries`] - 编译期注册的组件目录
//!
//! ## 设计原则
//!
//! - 描述符在构建后不可变，具体类型通过闭包擦除
//! - 约定优于配置：Bean 名称默认由类型名推导
//! - 所有失败都以类型化错误返回

pub mod component;
pub mod configuration;
pub mod conventions;
pub mod discovery;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use configuration::*;
pub use conventions::*;
pub use discovery::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
