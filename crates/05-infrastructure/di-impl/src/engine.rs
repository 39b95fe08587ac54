//! 实例化引擎
//!
//! 根据描述符创建完整初始化的 Bean，生命周期严格按以下顺序推进：
//!
//! 1. 分配实例
//! 2. 按槽位名称解析并注入依赖
//! 3. Bean 名称回调
//! 4. 后置处理器前置处理
//! 5. 初始化回调
//! 6. 后置处理器后置处理
//! 7. 返回实例

use crate::post_processors::PostProcessorPipeline;
use di_abstractions::BeanResolver;
use ioc_common::{BeanError, BeanRef, BeanResult, ComponentDescriptor, LifecycleState};
use std::sync::Arc;
use tracing::{debug, debug_span, trace};

/// 实例化引擎
#[derive(Debug, Default)]
pub struct InstantiationEngine {
    post_processors: Arc<PostProcessorPipeline>,
}

impl InstantiationEngine {
    /// 使用指定的后置处理器管道创建引擎
    pub fn new(post_processors: Arc<PostProcessorPipeline>) -> Self {
        Self { post_processors }
    }

    /// 后置处理器管道
    pub fn post_processors(&self) -> &Arc<PostProcessorPipeline> {
        &self.post_processors
    }

    /// 创建 Bean
    ///
    /// 依赖通过 `resolver` 递归获取，任何一步失败都会中止创建，不留下部分状态。
    pub fn create(
        &self,
        name: &str,
        descriptor: &ComponentDescriptor,
        resolver: &dyn BeanResolver,
    ) -> BeanResult<BeanRef> {
        let span = debug_span!("create_bean", bean = %name, scope = %descriptor.scope());
        let _enter = span.enter();

        let mut bean = descriptor
            .instantiate()
            .map_err(|source| BeanError::InstantiationFailure {
                name: name.to_string(),
                type_name: descriptor.type_info().type_path.clone(),
                source,
            })?;
        let mut state = LifecycleState::Allocated;
        trace!(?state, "实例已分配");

        for slot in descriptor.dependency_slots() {
            let dependency =
                resolver
                    .resolve(slot.name())
                    .map_err(|e| BeanError::UnsatisfiedDependency {
                        bean: name.to_string(),
                        slot: slot.name().to_string(),
                        source: Box::new(e),
                    })?;

            if !slot.inject(bean.as_mut(), dependency) {
                return Err(BeanError::DependencyTypeMismatch {
                    bean: name.to_string(),
                    slot: slot.name().to_string(),
                    expected: slot.expected().type_path.clone(),
                });
            }
            trace!(slot = slot.name(), "依赖已注入");
        }
        state = advance(state);

        descriptor.assign_bean_name(bean.as_mut(), name);
        state = advance(state);

        self.post_processors
            .apply_before_initialization(name, bean.as_mut());
        state = advance(state);

        if let Some(result) = descriptor.initialize(bean.as_mut()) {
            result.map_err(|source| BeanError::InitializationFailure {
                name: name.to_string(),
                source,
            })?;
        }
        state = advance(state);

        self.post_processors
            .apply_after_initialization(name, bean.as_mut());
        state = advance(state);

        state = advance(state);
        debug!(?state, "Bean 创建完成: {}", name);

        Ok(Arc::from(bean))
    }
}

fn advance(state: LifecycleState) -> LifecycleState {
    let next = state.next().unwrap_or(state);
    trace!(from = ?state, to = ?next, "生命周期推进");
    next
}
