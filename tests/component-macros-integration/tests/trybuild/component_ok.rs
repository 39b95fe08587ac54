use component_macros::component;
use std::sync::Arc;

#[component]
#[derive(Debug, Default)]
struct OkService;

#[component(name = "consumer", prototype)]
#[derive(Debug, Default)]
struct Consumer {
    #[autowired(name = "okService")]
    dependency: Option<Arc<OkService>>,
}

fn main() {
    let descriptor = OkService::component_descriptor().unwrap();
    assert_eq!(descriptor.name(), "okService");
    assert!(descriptor.is_singleton());

    let consumer = Consumer::component_descriptor().unwrap();
    assert_eq!(consumer.name(), "consumer");
    assert!(consumer.is_prototype());
    assert_eq!(consumer.dependency_slots()[0].name(), "okService");
    assert!(Consumer::default().dependency.is_none());
}
