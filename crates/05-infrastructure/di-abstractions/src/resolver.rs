//! 依赖解析器抽象接口

use ioc_common::{BeanRef, BeanResult};

/// 依赖解析器 trait
///
/// 实例化引擎通过它按槽位名称获取依赖，容器本身就是解析器，
/// 所以依赖的获取与普通的 `get_bean` 走同一条路径。
pub trait BeanResolver: Send + Sync {
    /// 按名称解析 Bean
    fn resolve(&self, name: &str) -> BeanResult<BeanRef>;
}
