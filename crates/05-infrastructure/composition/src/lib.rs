//! # 应用上下文组合层
//!
//! 这个 crate 负责把组件发现、描述符注册表和容器核心组合成一个可运行的应用上下文。
//!
//! ## 主要功能
//!
//! - **应用上下文构建器**: 使用构建者模式组装扫描器、手动描述符和日志
//! - **组件目录扫描**: 读取 `#[component]` 编译期提交的组件，按扫描根路径过滤
//! - **启动报告**: 记录注册数量、预创建的单例和被跳过的组件
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use ioc_composition::{ApplicationContext, ContainerConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = ApplicationContext::new(ContainerConfig::with_base_package("my_app::services"))?;
//!
//!     let user_service = context.get_bean("userService")?;
//!     println!("{:?}", context.report());
//!     # let _ = user_service;
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod scanner;


// 重新导出主要类型
pub use builder::{ApplicationContextBuilder, LoggingConfig};
pub use context::{ApplicationContext, DiscoveryPhase, SkippedComponent, StartupReport};
pub use scanner::CatalogComponentScanner;

// 重新导出常用的抽象和配置
pub use di_abstractions::{BeanFactory, BeanFactoryExt, ComponentScanner, ScanTarget};
pub use ioc_common::{BeanError, ContainerConfig, ContextError, ContextResult};
