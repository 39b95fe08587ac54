//! 组件扫描实现

use di_abstractions::{ComponentScanner, ScanTarget};
use ioc_common::{catalog_entries, BeanResult, CatalogEntry, ComponentDescriptor};
use tracing::debug;

/// 目录组件扫描器
///
/// 读取 `#[component]` 在启动前提交的全局目录，保留扫描根路径下的条目，
/// 按 (模块路径, 类型名) 排序，保证每次启动的发现顺序一致。
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogComponentScanner;

impl CatalogComponentScanner {
    /// 创建目录扫描器
    pub fn new() -> Self {
        Self
    }

    /// 扫描范围内的目录条目，已排序
    pub fn entries(&self, target: &ScanTarget) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = catalog_entries()
            .into_iter()
            .filter(|entry| target.matches(entry.module_path))
            .collect();
        entries.sort_by(|a, b| {
            (a.module_path, a.type_name).cmp(&(b.module_path, b.type_name))
        });
        entries
    }
}

impl ComponentScanner for CatalogComponentScanner {
    fn scan(&self, target: &ScanTarget) -> Vec<BeanResult<ComponentDescriptor>> {
        let entries = self.entries(target);
        debug!(
            "扫描组件目录: 根路径 '{}', 命中 {} 个组件",
            target.base_package,
            entries.len()
        );

        entries.into_iter().map(|entry| (entry.factory)()).collect()
    }

    fn name(&self) -> &str {
        "CatalogComponentScanner"
    }
}
