//! 应用上下文构建器

use crate::context::ApplicationContext;
use crate::scanner::CatalogComponentScanner;
use di_abstractions::ComponentScanner;
use ioc_common::{ComponentDescriptor, ContainerConfig, ContextError, ContextResult};
use tracing::info;

/// 应用上下文构建器
///
/// 手动注册的描述符排在扫描器结果之前，扫描器按添加顺序执行。
pub struct ApplicationContextBuilder {
    /// 容器配置
    config: ContainerConfig,
    /// 手动注册的描述符
    descriptors: Vec<ComponentDescriptor>,
    /// 组件扫描器
    scanners: Vec<Box<dyn ComponentScanner>>,
    /// 是否初始化日志
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ApplicationContextBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            descriptors: Vec::new(),
            scanners: Vec::new(),
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置扫描根路径
    pub fn base_package(mut self, base_package: impl Into<String>) -> Self {
        self.config.base_package = base_package.into();
        self
    }

    /// 手动注册描述符
    pub fn register(mut self, descriptor: ComponentDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// 添加组件扫描器
    pub fn add_scanner<S>(mut self, scanner: S) -> Self
    where
        S: ComponentScanner + 'static,
    {
        self.scanners.push(Box::new(scanner));
        self
    }

    /// 添加全局目录扫描器
    pub fn with_catalog_scanner(self) -> Self {
        self.add_scanner(CatalogComponentScanner::new())
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true;
        self
    }

    /// 构建并启动应用上下文
    pub fn build(self) -> ContextResult<ApplicationContext> {
        // 只有在明确配置了日志时才初始化日志，避免测试之间争抢全局订阅者
        if self.logging_enabled {
            self.logging_config.initialize()?;
        }

        self.config.validate()?;
        info!(
            "开始构建应用上下文: 根路径 '{}', {} 个手动描述符, {} 个扫描器",
            self.config.base_package,
            self.descriptors.len(),
            self.scanners.len()
        );

        ApplicationContext::start(self.config, self.descriptors, &self.scanners)
    }
}

impl Default for ApplicationContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 设置日志级别
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// 初始化全局日志订阅者，已初始化时返回错误
    pub fn initialize(&self) -> ContextResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| ContextError::LoggingInit {
            message: e.to_string(),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
