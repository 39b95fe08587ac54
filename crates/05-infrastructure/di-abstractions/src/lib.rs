//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 Bean 注册、获取和组件发现的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanRegistry`] - 描述符注册表接口
//! - [`BeanFactory`] - 按名称获取 Bean 的运行时接口
//! - [`BeanResolver`] - 实例化引擎使用的依赖解析接口
//! - [`ComponentScanner`] - 组件扫描器接口

pub mod factory;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use factory::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
