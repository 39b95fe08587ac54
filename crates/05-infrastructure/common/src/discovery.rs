//! 组件发现目录
//!
//! `#[component]` 宏在程序启动前（通过 `ctor`）把组件工厂提交到进程级目录，
//! 扫描器在运行时读取目录并按扫描根路径过滤。

use crate::component::ComponentDescriptor;
use crate::conventions::ScanConventions;
use crate::errors::BeanResult;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// 描述符工厂函数
pub type DescriptorFactory = fn() -> BeanResult<ComponentDescriptor>;

/// 目录条目
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// 声明所在的模块路径
    pub module_path: &'static str,
    /// 类型名称
    pub type_name: &'static str,
    /// 描述符工厂
    pub factory: DescriptorFactory,
}

impl CatalogEntry {
    /// 是否位于扫描根路径之下
    pub fn in_base_package(&self, base_package: &str) -> bool {
        ScanConventions::in_base_package(self.module_path, base_package)
    }
}

static COMPONENT_CATALOG: Lazy<RwLock<Vec<CatalogEntry>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 提交组件到全局目录
pub fn submit_component(entry: CatalogEntry) {
    tracing::trace!("提交组件到目录: {}::{}", entry.module_path, entry.type_name);
    COMPONENT_CATALOG.write().push(entry);
}

/// 获取目录中的全部条目
pub fn catalog_entries() -> Vec<CatalogEntry> {
    COMPONENT_CATALOG.read().clone()
}
