//! 组件描述符定义
//!
//! 描述符是每个可发现类型的不可变元数据：名称、作用域、依赖槽位和能力。
//! 具体类型在构建时被擦除，容器只通过描述符中的函数操作实例。

use crate::conventions::NamingConventions;
use crate::errors::{BeanError, BeanResult, BoxError};
use crate::lifecycle::{BeanInstance, BeanNameAware, BeanPostProcessor, BeanScope, InitializingBean};
use crate::metadata::TypeInfo;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 容器交给调用方的 Bean 引用
pub type BeanRef = Arc<dyn Any + Send + Sync>;

type Allocator = Arc<dyn Fn() -> Result<Box<BeanInstance>, BoxError> + Send + Sync>;
type Injector = Arc<dyn Fn(&mut BeanInstance, BeanRef) -> bool + Send + Sync>;
type NameCallback = Arc<dyn Fn(&mut BeanInstance, &str) + Send + Sync>;
type InitCallback = Arc<dyn Fn(&mut BeanInstance) -> Result<(), BoxError> + Send + Sync>;
type ProcessorFactory =
    Arc<dyn Fn() -> Result<Arc<dyn BeanPostProcessor>, BoxError> + Send + Sync>;

/// 依赖槽位
///
/// 按名称注入：槽位名称必须等于某个已注册的 Bean 名称。
#[derive(Clone)]
pub struct DependencySlot {
    name: String,
    expected: TypeInfo,
    injector: Injector,
}

impl DependencySlot {
    /// 槽位名称，即被依赖 Bean 的名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 槽位期望的依赖类型
    pub fn expected(&self) -> &TypeInfo {
        &self.expected
    }

    /// 把依赖写入实例，类型不匹配时返回 `false`
    pub fn inject(&self, bean: &mut BeanInstance, dependency: BeanRef) -> bool {
        (self.injector)(bean, dependency)
    }
}

impl fmt::Debug for DependencySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencySlot")
            .field("name", &self.name)
            .field("expected", &self.expected.type_path)
            .finish()
    }
}

/// 组件描述符
#[derive(Clone)]
pub struct ComponentDescriptor {
    name: String,
    type_info: TypeInfo,
    scope: BeanScope,
    dependency_slots: Vec<DependencySlot>,
    allocator: Allocator,
    bean_name_aware: Option<NameCallback>,
    initializing: Option<InitCallback>,
    post_processor: Option<ProcessorFactory>,
}

impl ComponentDescriptor {
    /// 为可默认构造的类型创建描述符构建器
    pub fn builder<T>() -> ComponentDescriptorBuilder<T>
    where
        T: Default + Any + Send + Sync,
    {
        Self::from_factory(|| Ok(T::default()))
    }

    /// 使用可能失败的工厂函数创建描述符构建器
    pub fn from_factory<T, F>(factory: F) -> ComponentDescriptorBuilder<T>
    where
        T: Any + Send + Sync,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        ComponentDescriptorBuilder {
            name: None,
            type_info: TypeInfo::of::<T>(),
            scope: BeanScope::default(),
            dependency_slots: Vec::new(),
            factory: Arc::new(factory),
            bean_name_aware: None,
            initializing: None,
            post_processor: None,
            _marker: PhantomData,
        }
    }

    /// Bean 名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 组件类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 作用域
    pub fn scope(&self) -> BeanScope {
        self.scope
    }

    /// 是否单例
    pub fn is_singleton(&self) -> bool {
        self.scope == BeanScope::Singleton
    }

    /// 是否原型
    pub fn is_prototype(&self) -> bool {
        self.scope == BeanScope::Prototype
    }

    /// 依赖槽位，按声明顺序
    pub fn dependency_slots(&self) -> &[DependencySlot] {
        &self.dependency_slots
    }

    /// 是否实现了 Bean 名称回调
    pub fn is_bean_name_aware(&self) -> bool {
        self.bean_name_aware.is_some()
    }

    /// 是否实现了初始化回调
    pub fn is_initializing(&self) -> bool {
        self.initializing.is_some()
    }

    /// 是否为后置处理器
    pub fn is_post_processor(&self) -> bool {
        self.post_processor.is_some()
    }

    /// 分配一个新实例
    pub fn instantiate(&self) -> Result<Box<BeanInstance>, BoxError> {
        (self.allocator)()
    }

    /// 调用 Bean 名称回调，未实现时返回 `false`
    pub fn assign_bean_name(&self, bean: &mut BeanInstance, name: &str) -> bool {
        match &self.bean_name_aware {
            Some(callback) => {
                callback(bean, name);
                true
            }
            None => false,
        }
    }

    /// 调用初始化回调，未实现时返回 `None`
    pub fn initialize(&self, bean: &mut BeanInstance) -> Option<Result<(), BoxError>> {
        self.initializing.as_ref().map(|callback| callback(bean))
    }

    /// 创建独立的后置处理器实例，不是后置处理器时返回 `None`
    pub fn create_post_processor(&self) -> Option<Result<Arc<dyn BeanPostProcessor>, BoxError>> {
        self.post_processor.as_ref().map(|factory| factory())
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("type", &self.type_info.type_path)
            .field("module_path", &self.type_info.module_path)
            .field("scope", &self.scope)
            .field("dependency_slots", &self.dependency_slots)
            .field("bean_name_aware", &self.is_bean_name_aware())
            .field("initializing", &self.is_initializing())
            .field("post_processor", &self.is_post_processor())
            .field("allocator", &"<function>")
            .finish()
    }
}

/// 组件描述符构建器
pub struct ComponentDescriptorBuilder<T> {
    name: Option<String>,
    type_info: TypeInfo,
    scope: BeanScope,
    dependency_slots: Vec<DependencySlot>,
    factory: Arc<dyn Fn() -> Result<T, BoxError> + Send + Sync>,
    bean_name_aware: Option<NameCallback>,
    initializing: Option<InitCallback>,
    post_processor: Option<ProcessorFactory>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ComponentDescriptorBuilder<T>
where
    T: Any + Send + Sync,
{
    /// 设置显式 Bean 名称，未设置时由类型名推导
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 设置声明所在的模块路径，扫描时按此路径过滤
    pub fn module_path(mut self, module_path: impl Into<String>) -> Self {
        self.type_info.module_path = module_path.into();
        self
    }

    /// 设置作用域
    pub fn scope(mut self, scope: BeanScope) -> Self {
        self.scope = scope;
        self
    }

    /// 设置为原型作用域
    pub fn prototype(self) -> Self {
        self.scope(BeanScope::Prototype)
    }

    /// 声明一个依赖槽位
    ///
    /// `inject` 接收解析出的依赖，负责把它写入实例的字段。
    pub fn autowired<D, F>(mut self, slot: impl Into<String>, inject: F) -> Self
    where
        D: Any + Send + Sync,
        F: Fn(&mut T, Arc<D>) + Send + Sync + 'static,
    {
        let injector: Injector = Arc::new(move |bean: &mut BeanInstance, dependency: BeanRef| {
            let Some(target) = bean.downcast_mut::<T>() else {
                return false;
            };
            match dependency.downcast::<D>() {
                Ok(dependency) => {
                    inject(target, dependency);
                    true
                }
                Err(_) => false,
            }
        });

        self.dependency_slots.push(DependencySlot {
            name: slot.into(),
            expected: TypeInfo::of::<D>(),
            injector,
        });
        self
    }

    /// 声明实现了 [`BeanNameAware`]
    pub fn bean_name_aware(mut self) -> Self
    where
        T: BeanNameAware,
    {
        self.bean_name_aware = Some(Arc::new(|bean: &mut BeanInstance, name: &str| {
            if let Some(target) = bean.downcast_mut::<T>() {
                target.set_bean_name(name);
            }
        }));
        self
    }

    /// 声明实现了 [`InitializingBean`]
    pub fn initializing(mut self) -> Self
    where
        T: InitializingBean,
    {
        self.initializing = Some(Arc::new(|bean: &mut BeanInstance| {
            match bean.downcast_mut::<T>() {
                Some(target) => target.after_properties_set(),
                None => Err(format!("实例不是 {}", std::any::type_name::<T>()).into()),
            }
        }));
        self
    }

    /// 声明为后置处理器，处理器实例由同一个工厂独立创建
    pub fn post_processor(mut self) -> Self
    where
        T: BeanPostProcessor,
    {
        let factory = Arc::clone(&self.factory);
        self.post_processor = Some(Arc::new(move || {
            let processor = factory()?;
            Ok(Arc::new(processor) as Arc<dyn BeanPostProcessor>)
        }));
        self
    }

    /// 构建描述符
    pub fn build(self) -> BeanResult<ComponentDescriptor> {
        let name = match self.name {
            Some(name) => name,
            None => NamingConventions::default_bean_name(self.type_info.short_name()),
        };

        if !NamingConventions::is_valid_bean_name(&name) {
            return Err(BeanError::invalid_descriptor(format!(
                "{} 的 Bean 名称为空",
                self.type_info
            )));
        }

        let mut seen = HashSet::new();
        for slot in &self.dependency_slots {
            if !NamingConventions::is_valid_bean_name(&slot.name) {
                return Err(BeanError::invalid_descriptor(format!(
                    "{} 存在空的依赖槽位名称",
                    name
                )));
            }
            if !seen.insert(slot.name.as_str()) {
                return Err(BeanError::invalid_descriptor(format!(
                    "{} 的依赖槽位重复: {}",
                    name, slot.name
                )));
            }
        }

        let factory = self.factory;
        let allocator: Allocator = Arc::new(move || {
            let instance = factory()?;
            Ok(Box::new(instance) as Box<BeanInstance>)
        });

        Ok(ComponentDescriptor {
            name,
            type_info: self.type_info,
            scope: self.scope,
            dependency_slots: self.dependency_slots,
            allocator,
            bean_name_aware: self.bean_name_aware,
            initializing: self.initializing,
            post_processor: self.post_processor,
        })
    }
}
