//! 示例后置处理器

use crate::services::UserService;
use component_macros::component;
use ioc_common::{BeanInstance, BeanPostProcessor};
use tracing::info;

/// 只关注 `UserService` 的后置处理器
#[component(post_processor)]
#[derive(Debug, Default)]
pub struct MyBeanPostProcessor;

impl BeanPostProcessor for MyBeanPostProcessor {
    fn post_process_before_initialization(&self, bean_name: &str, bean: &mut BeanInstance) {
        if let Some(user) = bean.downcast_ref::<UserService>() {
            info!("postProcessBeforeInitialization: beanName={} bean={:?}", bean_name, user);
        }
    }

    fn post_process_after_initialization(&self, bean_name: &str, bean: &mut BeanInstance) {
        if let Some(user) = bean.downcast_ref::<UserService>() {
            info!("postProcessAfterInitialization: beanName={} bean={:?}", bean_name, user);
        }
    }

    fn name(&self) -> &str {
        "myBeanPostProcessor"
    }
}
