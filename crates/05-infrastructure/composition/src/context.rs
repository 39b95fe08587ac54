//! 应用上下文
//!
//! 启动分两个阶段：
//!
//! 1. 注册发现的全部描述符，后续的前向引用因此可以解析
//! 2. 按发现顺序处理每个描述符：后置处理器先实例化并加入管道，单例随即创建
//!
//! 第二阶段意味着后置处理器只作用于它之后创建的 Bean，先于它创建的单例不会经过它。
//! 设置 `post_processors_first` 后所有处理器会在任何单例创建前加入管道。

use crate::builder::ApplicationContextBuilder;
use chrono::{DateTime, Utc};
use di_abstractions::{BeanFactory, BeanFactoryExt, ComponentScanner, ScanTarget};
use di_impl::DiContainerImpl;
use ioc_common::{
    BeanError, BeanRef, BeanResult, ComponentDescriptor, ContainerConfig, ContextError,
    ContextResult, TypeInfo,
};
use serde::Serialize;
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 被跳过的组件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedComponent {
    /// 组件名称，描述符构建失败时为 `None`
    pub component: Option<String>,
    /// 失败阶段
    pub phase: DiscoveryPhase,
    /// 错误信息
    pub error: String,
}

/// 发现阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryPhase {
    /// 描述符构建
    Describe,
    /// 注册
    Register,
    /// 后置处理器实例化
    PostProcessor,
    /// 单例预创建
    EagerSingleton,
}

/// 启动报告
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    /// 上下文ID
    pub context_id: Uuid,
    /// 启动时间
    pub startup_date: DateTime<Utc>,
    /// 扫描根路径
    pub base_package: String,
    /// 已注册描述符数量
    pub registered: usize,
    /// 后置处理器数量
    pub post_processors: usize,
    /// 启动时创建的单例数量
    pub eager_singletons: usize,
    /// 被跳过的组件
    pub skipped: Vec<SkippedComponent>,
    /// 启动耗时（毫秒）
    pub elapsed_ms: u64,
}

impl StartupReport {
    /// 启动过程中是否没有跳过任何组件
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// 应用上下文
#[derive(Debug)]
pub struct ApplicationContext {
    id: Uuid,
    startup_date: DateTime<Utc>,
    config: ContainerConfig,
    container: Arc<DiContainerImpl>,
    report: StartupReport,
}

impl ApplicationContext {
    /// 创建构建器
    pub fn builder() -> ApplicationContextBuilder {
        ApplicationContextBuilder::new()
    }

    /// 使用配置和全局目录扫描器创建上下文
    pub fn new(config: ContainerConfig) -> ContextResult<Self> {
        ApplicationContextBuilder::new()
            .with_config(config)
            .with_catalog_scanner()
            .build()
    }

    /// 从配置文件创建上下文
    pub fn from_config_file(path: impl AsRef<Path>) -> ContextResult<Self> {
        let config = ContainerConfig::from_file(path)?;
        Self::new(config)
    }

    pub(crate) fn start(
        config: ContainerConfig,
        descriptors: Vec<ComponentDescriptor>,
        scanners: &[Box<dyn ComponentScanner>],
    ) -> ContextResult<Self> {
        let started = Instant::now();
        let id = Uuid::new_v4();
        let startup_date = Utc::now();
        info!("启动应用上下文 {} ({})", id, startup_date);

        let target = ScanTarget::from(&config);
        let mut feed: Vec<BeanResult<ComponentDescriptor>> =
            descriptors.into_iter().map(Ok).collect();
        for scanner in scanners {
            let found = scanner.scan(&target);
            info!("扫描器 {} 发现 {} 个组件", scanner.name(), found.len());
            feed.extend(found);
        }

        let mut bootstrap = Bootstrap {
            container: DiContainerImpl::with_overriding(config.allow_bean_definition_overriding),
            config: &config,
            skipped: Vec::new(),
            eager_singletons: 0,
        };

        let discovered = bootstrap.register_all(feed)?;
        bootstrap.instantiate(&discovered)?;

        let Bootstrap {
            container,
            skipped,
            eager_singletons,
            ..
        } = bootstrap;

        let report = StartupReport {
            context_id: id,
            startup_date,
            base_package: config.base_package.clone(),
            registered: container.bean_definition_count(),
            post_processors: container.post_processor_count(),
            eager_singletons,
            skipped,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            "应用上下文 {} 启动完成: {} 个 Bean, {} 个后置处理器, {} 个单例, 跳过 {} 个, 耗时 {} ms",
            id,
            report.registered,
            report.post_processors,
            report.eager_singletons,
            report.skipped.len(),
            report.elapsed_ms
        );

        Ok(Self {
            id,
            startup_date,
            config,
            container: Arc::new(container),
            report,
        })
    }

    /// 上下文ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 启动时间
    pub fn startup_date(&self) -> DateTime<Utc> {
        self.startup_date
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 启动报告
    pub fn report(&self) -> &StartupReport {
        &self.report
    }

    /// 底层容器
    pub fn container(&self) -> &Arc<DiContainerImpl> {
        &self.container
    }

    /// 按名称获取 Bean
    pub fn get_bean(&self, name: &str) -> BeanResult<BeanRef> {
        self.container.get_bean(name)
    }

    /// 按名称获取 Bean 并转换为具体类型
    pub fn get_bean_typed<T>(&self, name: &str) -> BeanResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.container.get_bean_typed(name)
    }
}

impl BeanFactory for ApplicationContext {
    fn get_bean(&self, name: &str) -> BeanResult<BeanRef> {
        self.container.get_bean(name)
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.container.contains_bean(name)
    }

    fn is_singleton(&self, name: &str) -> BeanResult<bool> {
        self.container.is_singleton(name)
    }

    fn is_prototype(&self, name: &str) -> BeanResult<bool> {
        self.container.is_prototype(name)
    }

    fn get_type(&self, name: &str) -> BeanResult<TypeInfo> {
        self.container.get_type(name)
    }

    fn bean_names(&self) -> Vec<String> {
        self.container.bean_names()
    }

    fn bean_definition_count(&self) -> usize {
        self.container.bean_definition_count()
    }

    fn singleton_count(&self) -> usize {
        self.container.singleton_count()
    }
}

/// 启动过程的状态
struct Bootstrap<'a> {
    container: DiContainerImpl,
    config: &'a ContainerConfig,
    skipped: Vec<SkippedComponent>,
    eager_singletons: usize,
}

impl Bootstrap<'_> {
    /// 第一阶段：注册描述符，返回成功注册的描述符，按发现顺序
    fn register_all(
        &mut self,
        feed: Vec<BeanResult<ComponentDescriptor>>,
    ) -> ContextResult<Vec<ComponentDescriptor>> {
        let mut discovered = Vec::with_capacity(feed.len());

        for item in feed {
            let descriptor = match item {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    self.skip(None, DiscoveryPhase::Describe, e)?;
                    continue;
                }
            };

            match self.container.register(descriptor.clone()) {
                Ok(()) => {
                    // 覆盖时只保留最后注册的描述符
                    discovered.retain(|d: &ComponentDescriptor| d.name() != descriptor.name());
                    discovered.push(descriptor);
                }
                Err(e) => {
                    self.skip(Some(descriptor.name()), DiscoveryPhase::Register, e)?;
                }
            }
        }

        Ok(discovered)
    }

    /// 第二阶段：实例化后置处理器并预创建单例
    fn instantiate(&mut self, discovered: &[ComponentDescriptor]) -> ContextResult<()> {
        if self.config.post_processors_first {
            for descriptor in discovered {
                self.add_post_processor(descriptor)?;
            }
            for descriptor in discovered {
                self.create_singleton(descriptor)?;
            }
        } else {
            for descriptor in discovered {
                self.add_post_processor(descriptor)?;
                self.create_singleton(descriptor)?;
            }
        }
        Ok(())
    }

    fn add_post_processor(&mut self, descriptor: &ComponentDescriptor) -> ContextResult<()> {
        let Some(result) = descriptor.create_post_processor() else {
            return Ok(());
        };

        match result {
            Ok(processor) => {
                info!("注册后置处理器: {}", descriptor.name());
                self.container.add_post_processor(processor);
                Ok(())
            }
            Err(source) => self.skip(
                Some(descriptor.name()),
                DiscoveryPhase::PostProcessor,
                BeanError::InstantiationFailure {
                    name: descriptor.name().to_string(),
                    type_name: descriptor.type_info().type_path.clone(),
                    source,
                },
            ),
        }
    }

    fn create_singleton(&mut self, descriptor: &ComponentDescriptor) -> ContextResult<()> {
        if !self.config.eager_singletons || !descriptor.is_singleton() {
            return Ok(());
        }

        match self.container.get_bean(descriptor.name()) {
            Ok(_) => {
                self.eager_singletons += 1;
                Ok(())
            }
            Err(e) => self.skip(Some(descriptor.name()), DiscoveryPhase::EagerSingleton, e),
        }
    }

    /// 记录发现阶段错误，`fail_fast` 时中止启动
    fn skip(
        &mut self,
        component: Option<&str>,
        phase: DiscoveryPhase,
        e: BeanError,
    ) -> ContextResult<()> {
        if self.config.fail_fast {
            error!("发现阶段失败 {:?} {:?}: {}", phase, component, e);
            return Err(ContextError::from(e));
        }

        warn!("跳过组件 {:?} ({:?}): {}", component, phase, e);
        self.skipped.push(SkippedComponent {
            component: component.map(str::to_string),
            phase,
            error: e.to_string(),
        });
        Ok(())
    }
}
