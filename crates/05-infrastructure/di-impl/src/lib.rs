//! # 依赖注入具体实现
//!
//! 提供描述符注册表、后置处理器管道、实例化引擎、单例缓存以及组合它们的容器。
//!
//! 构建顺序自底向上：
//!
//! - [`DefaultBeanRegistry`] - 名称到描述符的映射
//! - [`PostProcessorPipeline`] - 按注册顺序调用的后置处理器
//! - [`InstantiationEngine`] - 执行七步生命周期
//! - [`SingletonCache`] - 单例缓存，每个名称最多创建一次
//! - [`DiContainerImpl`] - `get_bean` 门面

mod creation_guard;

pub mod container;
pub mod engine;
pub mod post_processors;
pub mod registry;
pub mod scope_cache;

pub use container::*;
pub use engine::*;
pub use post_processors::*;
pub use registry::*;
pub use scope_cache::*;
