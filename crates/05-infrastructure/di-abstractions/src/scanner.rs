//! 组件扫描器抽象接口

use ioc_common::{BeanResult, ComponentDescriptor, ContainerConfig, ScanConventions};

/// 扫描目标
///
/// 扫描根路径是模块路径前缀，为空时匹配所有组件。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanTarget {
    /// 扫描根路径
    pub base_package: String,
}

impl ScanTarget {
    /// 创建扫描目标
    pub fn new(base_package: impl Into<String>) -> Self {
        Self {
            base_package: base_package.into(),
        }
    }

    /// 匹配所有组件的扫描目标
    pub fn all() -> Self {
        Self::default()
    }

    /// 检查模块路径是否在扫描范围内
    pub fn matches(&self, module_path: &str) -> bool {
        ScanConventions::in_base_package(module_path, &self.base_package)
    }
}

impl From<&ContainerConfig> for ScanTarget {
    fn from(config: &ContainerConfig) -> Self {
        Self::new(config.base_package.clone())
    }
}

/// 组件扫描器 trait
///
/// 按确定的顺序返回扫描范围内的描述符，单个条目的错误属于发现阶段错误，
/// 由调用方决定跳过还是中止。
pub trait ComponentScanner: Send + Sync {
    /// 扫描组件
    fn scan(&self, target: &ScanTarget) -> Vec<BeanResult<ComponentDescriptor>>;

    /// 扫描器名称
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
