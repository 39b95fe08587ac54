//! 组件宏集成测试

use ioc_composition::{ApplicationContext, BeanFactory, ContainerConfig, ScanTarget};
use ioc_composition::{CatalogComponentScanner, ContextError};
use std::sync::Arc;

mod shop {
    use component_macros::component;
    use ioc_common::{BeanInstance, BeanNameAware, BeanPostProcessor, BoxError, InitializingBean};
    use std::sync::Arc;

    #[component]
    #[derive(Debug, Default)]
    pub struct OrderService {
        pub processed_by: Vec<String>,
    }

    #[component(scope = "prototype", bean_name_aware, initializing)]
    #[derive(Debug, Default)]
    pub struct UserService {
        #[autowired]
        pub order_service: Option<Arc<OrderService>>,
        pub bean_name: String,
        pub initialized: bool,
    }

    impl BeanNameAware for UserService {
        fn set_bean_name(&mut self, name: &str) {
            self.bean_name = name.to_string();
        }
    }

    impl InitializingBean for UserService {
        fn after_properties_set(&mut self) -> Result<(), BoxError> {
            self.initialized = true;
            Ok(())
        }
    }

    #[component(name = "auditTrail", post_processor)]
    #[derive(Debug, Default)]
    pub struct AuditProcessor;

    impl BeanPostProcessor for AuditProcessor {
        fn post_process_after_initialization(&self, _bean_name: &str, bean: &mut BeanInstance) {
            if let Some(order_service) = bean.downcast_mut::<OrderService>() {
                order_service.processed_by.push("auditTrail".to_string());
            }
        }
    }

    #[component(name = "reportService")]
    #[derive(Debug, Default)]
    pub struct Reports {
        #[autowired(name = "orderService")]
        pub orders: Option<Arc<OrderService>>,
    }
}

mod other {
    use component_macros::component;

    #[component]
    #[derive(Debug, Default)]
    pub struct OutsideService;
}

fn shop_context() -> ApplicationContext {
    ApplicationContext::new(ContainerConfig::with_base_package(format!(
        "{}::shop",
        module_path!()
    )))
    .unwrap()
}

#[test]
fn test_generated_descriptor() {
    let descriptor = shop::UserService::component_descriptor().unwrap();

    assert_eq!(descriptor.name(), "userService");
    assert!(descriptor.is_prototype());
    assert!(descriptor.is_bean_name_aware());
    assert!(descriptor.is_initializing());
    assert!(!descriptor.is_post_processor());
    assert_eq!(descriptor.type_info().module_path, format!("{}::shop", module_path!()));

    let slots = descriptor.dependency_slots();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].name(), "orderService");
    assert!(slots[0].expected().is::<shop::OrderService>());
}

#[test]
fn test_catalog_is_sorted_and_filtered() {
    let scanner = CatalogComponentScanner::new();

    let shop: Vec<&str> = scanner
        .entries(&ScanTarget::new(format!("{}::shop", module_path!())))
        .iter()
        .map(|entry| entry.type_name)
        .collect();
    assert_eq!(
        shop,
        vec!["AuditProcessor", "OrderService", "Reports", "UserService"]
    );

    let other: Vec<&str> = scanner
        .entries(&ScanTarget::new(format!("{}::other", module_path!())))
        .iter()
        .map(|entry| entry.type_name)
        .collect();
    assert_eq!(other, vec!["OutsideService"]);
}

#[test]
fn test_scanned_context() {
    let context = shop_context();

    let mut names = context.bean_names();
    names.sort();
    assert_eq!(
        names,
        vec!["auditTrail", "orderService", "reportService", "userService"]
    );
    assert!(!context.contains_bean("outsideService"));
    assert!(context.report().is_clean());
    assert_eq!(context.report().post_processors, 1);

    let first = context
        .get_bean_typed::<shop::UserService>("userService")
        .unwrap();
    let second = context
        .get_bean_typed::<shop::UserService>("userService")
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.bean_name, "userService");
    assert!(first.initialized && second.initialized);

    let order = first.order_service.as_ref().unwrap();
    assert!(Arc::ptr_eq(order, second.order_service.as_ref().unwrap()));
    // 处理器按发现顺序先于 OrderService 注册
    assert_eq!(order.processed_by, vec!["auditTrail"]);

    let reports = context
        .get_bean_typed::<shop::Reports>("reportService")
        .unwrap();
    assert!(Arc::ptr_eq(reports.orders.as_ref().unwrap(), order));
}

#[test]
fn test_duplicate_across_scans_with_fail_fast() {
    let config = ContainerConfig {
        base_package: format!("{}::other", module_path!()),
        fail_fast: true,
        ..ContainerConfig::default()
    };

    let result = ApplicationContext::builder()
        .with_config(config)
        .with_catalog_scanner()
        .with_catalog_scanner()
        .build();

    assert!(matches!(result, Err(ContextError::BeanError { .. })));
}
