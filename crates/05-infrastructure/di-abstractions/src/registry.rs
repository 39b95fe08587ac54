//! Bean 注册表抽象接口

use ioc_common::{BeanResult, ComponentDescriptor};
use std::sync::Arc;

/// Bean 注册表 trait
///
/// 按名称保存组件描述符，名称唯一。
pub trait BeanRegistry: Send + Sync {
    /// 注册描述符
    ///
    /// 名称已存在时的行为由实现决定（拒绝或覆盖）。
    fn register(&self, descriptor: ComponentDescriptor) -> BeanResult<()>;

    /// 按名称查找描述符，不存在时返回 `BeanNotDefined`
    fn lookup(&self, name: &str) -> BeanResult<Arc<ComponentDescriptor>>;

    /// 是否已注册指定名称
    fn contains(&self, name: &str) -> bool;

    /// 所有已注册名称，按注册顺序
    fn names(&self) -> Vec<String>;

    /// 已注册描述符数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
