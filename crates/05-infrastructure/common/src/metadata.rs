//! 元数据定义
//!
//! 提供组件类型的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
///
/// 作为组件描述符中不透明的类型标识使用
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称（不含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub type_path: String,
    /// 声明所在的模块路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息，模块路径取自类型路径
    pub fn of<T: 'static>() -> Self {
        let type_path = std::any::type_name::<T>();
        let base = type_path.split('<').next().unwrap_or(type_path);
        let module_path = base
            .rsplit_once("::")
            .map(|(module, _)| module)
            .unwrap_or_default();
        Self::with_module::<T>(module_path)
    }

    /// 从类型和声明模块获取类型信息
    pub fn with_module<T: 'static>(module_path: impl Into<String>) -> Self {
        let type_path = std::any::type_name::<T>();
        Self {
            name: short_type_name(type_path).to_string(),
            id: TypeId::of::<T>(),
            type_path: type_path.to_string(),
            module_path: module_path.into(),
        }
    }

    /// 是否为指定类型
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_path)
    }
}

/// 去掉模块路径，保留泛型参数
fn short_type_name(type_path: &str) -> &str {
    let base = type_path.split('<').next().unwrap_or(type_path);
    match base.rfind("::") {
        Some(idx) => &type_path[idx + 2..],
        None => type_path,
    }
}
