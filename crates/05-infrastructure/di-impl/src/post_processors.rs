//! 后置处理器管道

use ioc_common::{BeanInstance, BeanPostProcessor};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// 后置处理器管道
///
/// 处理器按注册顺序调用。调用时使用快照，处理器内部可以再次获取 Bean。
#[derive(Default)]
pub struct PostProcessorPipeline {
    processors: RwLock<Vec<Arc<dyn BeanPostProcessor>>>,
}

impl PostProcessorPipeline {
    /// 创建空管道
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加处理器，只对之后创建的 Bean 生效
    pub fn add(&self, processor: Arc<dyn BeanPostProcessor>) {
        debug!("注册后置处理器: {}", processor.name());
        self.processors.write().push(processor);
    }

    /// 当前处理器快照
    pub fn snapshot(&self) -> Vec<Arc<dyn BeanPostProcessor>> {
        self.processors.read().clone()
    }

    /// 依次调用前置处理
    pub fn apply_before_initialization(&self, bean_name: &str, bean: &mut BeanInstance) {
        for processor in self.snapshot() {
            processor.post_process_before_initialization(bean_name, bean);
        }
    }

    /// 依次调用后置处理
    pub fn apply_after_initialization(&self, bean_name: &str, bean: &mut BeanInstance) {
        for processor in self.snapshot() {
            processor.post_process_after_initialization(bean_name, bean);
        }
    }

    /// 处理器数量
    pub fn len(&self) -> usize {
        self.processors.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PostProcessorPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .processors
            .read()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        f.debug_struct("PostProcessorPipeline")
            .field("processors", &names)
            .finish()
    }
}
