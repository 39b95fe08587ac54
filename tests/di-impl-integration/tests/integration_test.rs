//! 容器核心集成测试

use di_abstractions::{BeanFactory, BeanFactoryExt, BeanRegistry};
use di_impl::DiContainerImpl;
use ioc_common::{
    BeanError, BeanInstance, BeanNameAware, BeanPostProcessor, BoxError, ComponentDescriptor,
    InitializingBean,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Default)]
struct OrderService {
    orders: Vec<String>,
}

#[derive(Debug, Default)]
struct UserService {
    order_service: Option<Arc<OrderService>>,
    bean_name: String,
    journal: Option<Journal>,
}

impl UserService {
    fn record(&self, event: String) {
        if let Some(journal) = &self.journal {
            journal.lock().push(event);
        }
    }
}

impl BeanNameAware for UserService {
    fn set_bean_name(&mut self, name: &str) {
        self.bean_name = name.to_string();
        self.record(format!("aware:{name}"));
    }
}

impl InitializingBean for UserService {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        self.record(format!("init:{}", self.bean_name));
        Ok(())
    }
}

/// 记录调用并修改 `OrderService` 的处理器
struct MyBeanPostProcessor {
    journal: Journal,
}

impl BeanPostProcessor for MyBeanPostProcessor {
    fn post_process_before_initialization(&self, bean_name: &str, _bean: &mut BeanInstance) {
        self.journal.lock().push(format!("before:{bean_name}"));
    }

    fn post_process_after_initialization(&self, bean_name: &str, bean: &mut BeanInstance) {
        self.journal.lock().push(format!("after:{bean_name}"));
        if let Some(order_service) = bean.downcast_mut::<OrderService>() {
            order_service.orders.push("processed".to_string());
        }
    }
}

fn order_service_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::builder::<OrderService>().build().unwrap()
}

fn user_service_descriptor(journal: Journal) -> ComponentDescriptor {
    ComponentDescriptor::from_factory(move || {
        Ok(UserService {
            journal: Some(journal.clone()),
            ..UserService::default()
        })
    })
    .prototype()
    .autowired("orderService", |bean: &mut UserService, dep: Arc<OrderService>| {
        bean.order_service = Some(dep);
    })
    .bean_name_aware()
    .initializing()
    .build()
    .unwrap()
}

fn container_with_journal() -> (DiContainerImpl, Journal) {
    let journal: Journal = Arc::default();
    let container = DiContainerImpl::new();
    container.add_post_processor(Arc::new(MyBeanPostProcessor {
        journal: journal.clone(),
    }));
    container.register(order_service_descriptor()).unwrap();
    container
        .register(user_service_descriptor(journal.clone()))
        .unwrap();
    (container, journal)
}

#[test]
fn test_lifecycle_ordering() {
    let (container, journal) = container_with_journal();

    container.get_bean("userService").unwrap();

    let events = journal.lock().clone();
    let position = |event: &str| {
        events
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("missing event {event}: {events:?}"))
    };

    // 依赖先于依赖者完成全部生命周期
    assert!(position("after:orderService") < position("aware:userService"));
    assert!(position("aware:userService") < position("before:userService"));
    assert!(position("before:userService") < position("init:userService"));
    assert!(position("init:userService") < position("after:userService"));
}

#[test]
fn test_user_service_scenario() {
    let (container, _journal) = container_with_journal();

    let first = container.get_bean_typed::<UserService>("userService").unwrap();
    let second = container.get_bean_typed::<UserService>("userService").unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.bean_name, "userService");
    assert_eq!(second.bean_name, "userService");

    let order_a = first.order_service.as_ref().unwrap();
    let order_b = second.order_service.as_ref().unwrap();
    assert!(Arc::ptr_eq(order_a, order_b));

    let order = container
        .get_bean_typed::<OrderService>("orderService")
        .unwrap();
    assert!(Arc::ptr_eq(order_a, &order));
    // 后置处理器的修改只发生一次
    assert_eq!(order.orders, vec!["processed"]);
}

#[test]
fn test_not_defined_constructs_nothing() {
    let created = Arc::new(AtomicUsize::new(0));
    let container = DiContainerImpl::new();
    let counter = created.clone();
    container
        .register(
            ComponentDescriptor::from_factory(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(OrderService::default())
            })
            .build()
            .unwrap(),
        )
        .unwrap();

    let err = container.get_bean("nonexistent").unwrap_err();

    assert!(matches!(err, BeanError::BeanNotDefined { ref name } if name == "nonexistent"));
    assert_eq!(created.load(Ordering::SeqCst), 0);
    assert_eq!(container.singleton_count(), 0);
    assert_eq!(container.registry().len(), 1);
}

#[test]
fn test_singleton_identity_across_calls() {
    let (container, _journal) = container_with_journal();
    let a = container.get_bean("orderService").unwrap();
    let b = container.get_bean("orderService").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_typed_lookup_wrong_type() {
    let (container, _journal) = container_with_journal();

    let err = container
        .get_bean_typed::<UserService>("orderService")
        .unwrap_err();
    assert!(matches!(err, BeanError::BeanNotOfRequiredType { .. }));
}

#[test]
fn test_dependency_type_mismatch_through_container() {
    #[derive(Default)]
    struct Mislabeled {
        order_service: Option<Arc<OrderService>>,
    }

    let container = DiContainerImpl::new();
    container
        .register(
            ComponentDescriptor::builder::<UserService>()
                .name("orderService")
                .build()
                .unwrap(),
        )
        .unwrap();
    container
        .register(
            ComponentDescriptor::builder::<Mislabeled>()
                .autowired("orderService", |bean: &mut Mislabeled, dep: Arc<OrderService>| {
                    bean.order_service = Some(dep);
                })
                .build()
                .unwrap(),
        )
        .unwrap();

    let err = container.get_bean("mislabeled").unwrap_err();
    assert!(matches!(err, BeanError::DependencyTypeMismatch { .. }));
    assert!(!container.singletons().contains("mislabeled"));
}

#[test]
fn test_initialization_failure_propagates_and_is_not_cached() -> anyhow::Result<()> {
    #[derive(Default)]
    struct Flaky;

    impl InitializingBean for Flaky {
        fn after_properties_set(&mut self) -> Result<(), BoxError> {
            Err("database unavailable".into())
        }
    }

    let container = DiContainerImpl::new();
    container.register(ComponentDescriptor::builder::<Flaky>().initializing().build()?)?;

    for _ in 0..2 {
        let err = container.get_bean("flaky").unwrap_err();
        assert!(matches!(err, BeanError::InitializationFailure { .. }));
        assert!(err.to_string().contains("database unavailable"));
    }
    assert_eq!(container.singleton_count(), 0);
    Ok(())
}

#[test]
fn test_cycle_is_reported() {
    #[derive(Default)]
    struct Left {
        right: Option<Arc<Right>>,
    }

    #[derive(Default)]
    struct Right {
        left: Option<Arc<Left>>,
    }

    let container = DiContainerImpl::new();
    container
        .register(
            ComponentDescriptor::builder::<Left>()
                .autowired("right", |bean: &mut Left, dep: Arc<Right>| bean.right = Some(dep))
                .build()
                .unwrap(),
        )
        .unwrap();
    container
        .register(
            ComponentDescriptor::builder::<Right>()
                .autowired("left", |bean: &mut Right, dep: Arc<Left>| bean.left = Some(dep))
                .build()
                .unwrap(),
        )
        .unwrap();

    let err = container.get_bean("left").unwrap_err();
    match err.root_cause() {
        BeanError::CurrentlyInCreation { name, chain } => {
            assert_eq!(name, "left");
            assert_eq!(chain, "left -> right -> left");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(container.singleton_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_get_bean() {
    let created = Arc::new(AtomicUsize::new(0));
    let container = Arc::new(DiContainerImpl::new());
    let counter = created.clone();
    container
        .register(
            ComponentDescriptor::from_factory(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(5));
                Ok(OrderService::default())
            })
            .build()
            .unwrap(),
        )
        .unwrap();
    container
        .register(user_service_descriptor(Arc::default()))
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let container = Arc::clone(&container);
        handles.push(tokio::task::spawn_blocking(move || {
            container.get_bean_typed::<UserService>("userService")
        }));
    }

    let mut users = Vec::new();
    for handle in handles {
        users.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(created.load(Ordering::SeqCst), 1);
    let first_order = users[0].order_service.as_ref().unwrap();
    for user in &users {
        assert!(Arc::ptr_eq(user.order_service.as_ref().unwrap(), first_order));
    }
    for pair in users.windows(2) {
        assert!(!Arc::ptr_eq(&pair[0], &pair[1]));
    }
}

/// 工厂只在首次调用时等待屏障，使两个线程同时持有各自的创建锁
fn rendezvous_factory<T: Default>(
    barrier: Arc<std::sync::Barrier>,
) -> impl Fn() -> Result<T, BoxError> + Send + Sync + 'static {
    let calls = AtomicUsize::new(0);
    move || {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            barrier.wait();
        }
        Ok(T::default())
    }
}

#[test]
fn test_cross_thread_cycle_does_not_hang() {
    #[derive(Default)]
    struct Left {
        right: Option<Arc<Right>>,
    }

    #[derive(Default)]
    struct Right {
        left: Option<Arc<Left>>,
    }

    let barrier = Arc::new(std::sync::Barrier::new(2));
    let container = Arc::new(DiContainerImpl::new());
    container
        .register(
            ComponentDescriptor::from_factory(rendezvous_factory::<Left>(barrier.clone()))
                .autowired("right", |bean: &mut Left, dep: Arc<Right>| bean.right = Some(dep))
                .build()
                .unwrap(),
        )
        .unwrap();
    container
        .register(
            ComponentDescriptor::from_factory(rendezvous_factory::<Right>(barrier))
                .autowired("left", |bean: &mut Right, dep: Arc<Left>| bean.left = Some(dep))
                .build()
                .unwrap(),
        )
        .unwrap();

    let (tx, rx) = std::sync::mpsc::channel();
    for name in ["left", "right"] {
        let container = Arc::clone(&container);
        let tx = tx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(container.get_bean(name).map(|_| ()));
        });
    }

    for _ in 0..2 {
        let result = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("get_bean did not return within 5s");
        let err = result.unwrap_err();
        assert!(
            matches!(err.root_cause(), BeanError::CurrentlyInCreation { .. }),
            "unexpected error: {err}"
        );
    }
    assert_eq!(container.singleton_count(), 0);
}

#[test]
fn test_override_during_first_creation_wins() {
    #[derive(Debug, Default)]
    struct LegacyOrderService;

    let (started_tx, started_rx) = std::sync::mpsc::channel::<()>();
    let (go_tx, go_rx) = std::sync::mpsc::channel::<()>();
    let go_rx = Mutex::new(go_rx);

    let container = Arc::new(DiContainerImpl::with_overriding(true));
    container
        .register(
            ComponentDescriptor::from_factory(move || {
                let _ = started_tx.send(());
                let _ = go_rx.lock().recv();
                Ok(LegacyOrderService)
            })
            .name("orderService")
            .build()
            .unwrap(),
        )
        .unwrap();

    let creating = {
        let container = Arc::clone(&container);
        std::thread::spawn(move || container.get_bean("orderService").map(|_| ()))
    };
    started_rx.recv().unwrap();

    let overriding = {
        let container = Arc::clone(&container);
        std::thread::spawn(move || container.register(order_service_descriptor()))
    };
    // 覆盖注册在首次创建完成前发起
    std::thread::sleep(std::time::Duration::from_millis(50));
    go_tx.send(()).unwrap();

    creating.join().unwrap().unwrap();
    overriding.join().unwrap().unwrap();

    assert!(container
        .get_bean_typed::<OrderService>("orderService")
        .is_ok());
}
