//! 示例业务组件

use component_macros::component;
use ioc_common::{BeanNameAware, BoxError, InitializingBean};
use std::sync::Arc;
use tracing::info;

/// 订单服务，单例
#[component]
#[derive(Debug, Default)]
pub struct OrderService;

impl OrderService {
    pub fn place_order(&self, user: &str, item: &str) -> String {
        format!("{} ordered {}", user, item)
    }
}

/// 用户服务，每次获取都是新实例
#[component(scope = "prototype", bean_name_aware, initializing)]
#[derive(Debug, Default)]
pub struct UserService {
    #[autowired]
    order_service: Option<Arc<OrderService>>,
    bean_name: String,
}

impl UserService {
    pub fn bean_name(&self) -> &str {
        &self.bean_name
    }

    pub fn order_service(&self) -> Option<&Arc<OrderService>> {
        self.order_service.as_ref()
    }

    pub fn checkout(&self, item: &str) -> Option<String> {
        self.order_service
            .as_ref()
            .map(|orders| orders.place_order(&self.bean_name, item))
    }
}

impl BeanNameAware for UserService {
    fn set_bean_name(&mut self, name: &str) {
        self.bean_name = name.to_string();
    }
}

impl InitializingBean for UserService {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        info!("afterPropertiesSet: {}", self.bean_name);
        Ok(())
    }
}
