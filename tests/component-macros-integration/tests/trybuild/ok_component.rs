use component_macros::component;
use ioc_common::{BeanInstance, BeanNameAware, BeanPostProcessor, BoxError, InitializingBean};
use std::sync::Arc;

#[component(scope = "singleton")]
#[derive(Debug, Default)]
pub struct OrderService;

#[component(scope = "prototype", bean_name_aware, initializing)]
#[derive(Debug, Default)]
pub struct UserService {
    #[autowired]
    order_service: Option<Arc<OrderService>>,
    bean_name: String,
}

impl BeanNameAware for UserService {
    fn set_bean_name(&mut self, name: &str) {
        self.bean_name = name.to_string();
    }
}

impl InitializingBean for UserService {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[component(post_processor)]
#[derive(Debug, Default)]
pub struct LoggingProcessor;

impl BeanPostProcessor for LoggingProcessor {
    fn post_process_after_initialization(&self, _bean_name: &str, _bean: &mut BeanInstance) {}
}

fn main() {
    let user = UserService::component_descriptor().unwrap();
    assert_eq!(user.name(), "userService");
    assert!(user.is_bean_name_aware());
    assert!(user.is_initializing());
    assert_eq!(user.dependency_slots()[0].name(), "orderService");

    let processor = LoggingProcessor::component_descriptor().unwrap();
    assert!(processor.is_post_processor());
    assert!(processor.create_post_processor().unwrap().is_ok());

    let _ = (UserService::default().order_service, UserService::default().bean_name);
    let _ = OrderService::component_descriptor().unwrap();
}
