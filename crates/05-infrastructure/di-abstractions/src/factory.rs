//! Bean 工厂抽象接口

use ioc_common::{BeanError, BeanRef, BeanResult, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// Bean 工厂 trait
///
/// 运行时按名称获取 Bean 的入口，单例返回同一实例，原型每次返回新实例。
pub trait BeanFactory: Send + Sync {
    /// 按名称获取 Bean
    fn get_bean(&self, name: &str) -> BeanResult<BeanRef>;

    /// 是否定义了指定名称的 Bean
    fn contains_bean(&self, name: &str) -> bool;

    /// 指定 Bean 是否为单例
    fn is_singleton(&self, name: &str) -> BeanResult<bool>;

    /// 指定 Bean 是否为原型
    fn is_prototype(&self, name: &str) -> BeanResult<bool>;

    /// 指定 Bean 的类型信息
    fn get_type(&self, name: &str) -> BeanResult<TypeInfo>;

    /// 所有 Bean 名称，按注册顺序
    fn bean_names(&self) -> Vec<String>;

    /// 描述符数量
    fn bean_definition_count(&self) -> usize;

    /// 已缓存的单例数量
    fn singleton_count(&self) -> usize;
}

/// 带类型的 Bean 获取
pub trait BeanFactoryExt: BeanFactory {
    /// 按名称获取 Bean 并转换为具体类型
    fn get_bean_typed<T>(&self, name: &str) -> BeanResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let bean = self.get_bean(name)?;
        bean.downcast::<T>().map_err(|_| {
            let actual = self
                .get_type(name)
                .map(|info| info.type_path)
                .unwrap_or_else(|_| "<unknown>".to_string());
            BeanError::BeanNotOfRequiredType {
                name: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual,
            }
        })
    }
}

impl<F: BeanFactory + ?Sized> BeanFactoryExt for F {}
