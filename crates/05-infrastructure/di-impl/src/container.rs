//! 容器门面实现

use crate::creation_guard::CreationGuard;
use crate::engine::InstantiationEngine;
use crate::post_processors::PostProcessorPipeline;
use crate::registry::DefaultBeanRegistry;
use crate::scope_cache::SingletonCache;
use di_abstractions::{BeanFactory, BeanRegistry, BeanResolver};
use ioc_common::{BeanPostProcessor, BeanRef, BeanResult, BeanScope, ComponentDescriptor, TypeInfo};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

static NEXT_CONTAINER_ID: AtomicUsize = AtomicUsize::new(1);

/// 具体的依赖注入容器实现
///
/// 组合注册表、实例化引擎和单例缓存，按作用域分发 `get_bean` 请求：
/// 单例先查缓存再创建，原型每次创建新实例且不进入缓存。
#[derive(Debug)]
pub struct DiContainerImpl {
    id: usize,
    registry: DefaultBeanRegistry,
    singletons: SingletonCache,
    engine: InstantiationEngine,
}

impl DiContainerImpl {
    /// 创建新的容器，重名描述符会被拒绝
    pub fn new() -> Self {
        Self::with_overriding(false)
    }

    /// 创建新的容器并指定重名策略
    pub fn with_overriding(allow_bean_definition_overriding: bool) -> Self {
        Self {
            id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
            registry: DefaultBeanRegistry::with_overriding(allow_bean_definition_overriding),
            singletons: SingletonCache::new(),
            engine: InstantiationEngine::new(Arc::new(PostProcessorPipeline::new())),
        }
    }

    /// 描述符注册表
    pub fn registry(&self) -> &DefaultBeanRegistry {
        &self.registry
    }

    /// 单例缓存
    pub fn singletons(&self) -> &SingletonCache {
        &self.singletons
    }

    /// 后置处理器管道
    pub fn post_processors(&self) -> &PostProcessorPipeline {
        self.engine.post_processors()
    }

    /// 注册描述符
    ///
    /// 允许覆盖时在该名称的创建锁内替换描述符，并丢弃已缓存的单例；
    /// 进行中的首次创建会先完成，其结果随后被丢弃。
    pub fn register(&self, descriptor: ComponentDescriptor) -> BeanResult<()> {
        if !self.registry.allows_overriding() {
            return self.registry.register(descriptor);
        }

        let name = descriptor.name().to_string();
        self.singletons
            .replace_with(&name, || self.registry.register(descriptor))
    }

    /// 追加后置处理器，只对之后创建的 Bean 生效
    pub fn add_post_processor(&self, processor: Arc<dyn BeanPostProcessor>) {
        self.engine.post_processors().add(processor);
    }

    /// 后置处理器数量
    pub fn post_processor_count(&self) -> usize {
        self.engine.post_processors().len()
    }

    fn create_bean(&self, name: &str, descriptor: &ComponentDescriptor) -> BeanResult<BeanRef> {
        let _guard = CreationGuard::enter(self.id, name)?;
        self.engine.create(name, descriptor, self)
    }
}

impl Default for DiContainerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanFactory for DiContainerImpl {
    fn get_bean(&self, name: &str) -> BeanResult<BeanRef> {
        let descriptor = self.registry.lookup(name)?;

        match descriptor.scope() {
            BeanScope::Singleton => {
                if let Some(instance) = self.singletons.get(name) {
                    return Ok(instance);
                }
                // 守卫必须在创建锁之前进入，否则同线程重入会死锁
                let _guard = CreationGuard::enter(self.id, name)?;
                self.singletons.get_or_create_with(name, || {
                    // 持有创建锁后重新查找，等待期间描述符可能已被覆盖
                    let current = self.registry.lookup(name)?;
                    info!("创建单例 Bean: {}", name);
                    let instance = self.engine.create(name, &current, self)?;
                    Ok((instance, current.is_singleton()))
                })
            }
            BeanScope::Prototype => {
                debug!("创建原型 Bean: {}", name);
                self.create_bean(name, &descriptor)
            }
        }
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    fn is_singleton(&self, name: &str) -> BeanResult<bool> {
        Ok(self.registry.lookup(name)?.is_singleton())
    }

    fn is_prototype(&self, name: &str) -> BeanResult<bool> {
        Ok(self.registry.lookup(name)?.is_prototype())
    }

    fn get_type(&self, name: &str) -> BeanResult<TypeInfo> {
        Ok(self.registry.lookup(name)?.type_info().clone())
    }

    fn bean_names(&self) -> Vec<String> {
        self.registry.names()
    }

    fn bean_definition_count(&self) -> usize {
        self.registry.len()
    }

    fn singleton_count(&self) -> usize {
        self.singletons.len()
    }
}

impl BeanResolver for DiContainerImpl {
    fn resolve(&self, name: &str) -> BeanResult<BeanRef> {
        self.get_bean(name)
    }
}
