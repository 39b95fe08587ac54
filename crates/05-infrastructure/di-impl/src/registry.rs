//! 描述符注册表实现

use di_abstractions::BeanRegistry;
use ioc_common::{BeanError, BeanResult, ComponentDescriptor};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct RegistryState {
    descriptors: HashMap<String, Arc<ComponentDescriptor>>,
    order: Vec<String>,
}

/// 默认描述符注册表
///
/// 启动后以读为主，手动注册可能与 `get_bean` 并发，所以用读写锁保护。
#[derive(Debug, Default)]
pub struct DefaultBeanRegistry {
    state: RwLock<RegistryState>,
    allow_overriding: bool,
}

impl DefaultBeanRegistry {
    /// 创建拒绝重名的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建注册表，`allow_overriding` 为真时同名描述符覆盖旧描述符
    pub fn with_overriding(allow_overriding: bool) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            allow_overriding,
        }
    }

    /// 是否允许覆盖
    pub fn allows_overriding(&self) -> bool {
        self.allow_overriding
    }

    /// 按注册顺序返回所有描述符
    pub fn descriptors(&self) -> Vec<Arc<ComponentDescriptor>> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|name| state.descriptors.get(name).cloned())
            .collect()
    }
}

impl BeanRegistry for DefaultBeanRegistry {
    fn register(&self, descriptor: ComponentDescriptor) -> BeanResult<()> {
        let name = descriptor.name().to_string();
        let mut state = self.state.write();

        if let Some(existing) = state.descriptors.get(&name) {
            if !self.allow_overriding {
                return Err(BeanError::DuplicateBeanName {
                    name,
                    existing_type: existing.type_info().type_path.clone(),
                    new_type: descriptor.type_info().type_path.clone(),
                });
            }

            warn!(
                "覆盖 Bean 描述符: {} ({} -> {})",
                name,
                existing.type_info(),
                descriptor.type_info()
            );
            state.descriptors.insert(name, Arc::new(descriptor));
            return Ok(());
        }

        info!(
            "注册 Bean: {} ({}, {})",
            name,
            descriptor.type_info(),
            descriptor.scope()
        );
        state.order.push(name.clone());
        state.descriptors.insert(name, Arc::new(descriptor));
        Ok(())
    }

    fn lookup(&self, name: &str) -> BeanResult<Arc<ComponentDescriptor>> {
        self.state
            .read()
            .descriptors
            .get(name)
            .cloned()
            .ok_or_else(|| BeanError::not_defined(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.state.read().descriptors.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        self.state.read().order.clone()
    }

    fn len(&self) -> usize {
        self.state.read().order.len()
    }
}
