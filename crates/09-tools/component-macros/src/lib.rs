//! # Component Macros
//!
//! 这个 crate 提供了用于编译期组件注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`component`] - 生成组件描述符并在程序启动前提交到全局目录
//!
//! 使用宏的 crate 需要依赖 `ioc-common` 和 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::component;
//! use ioc_common::{BeanNameAware, BoxError, InitializingBean};
//! use std::sync::Arc;
//!
//! #[component]
//! #[derive(Debug, Default)]
//! pub struct OrderService;
//!
//! #[component(scope = "prototype", bean_name_aware, initializing)]
//! #[derive(Debug, Default)]
//! pub struct UserService {
//!     #[autowired]
//!     order_service: Option<Arc<OrderService>>,
//!     bean_name: String,
//! }
//!
//! impl BeanNameAware for UserService {
//!     fn set_bean_name(&mut self, name: &str) {
//!         self.bean_name = name.to_string();
//!     }
//! }
//!
//! impl InitializingBean for UserService {
//!     fn after_properties_set(&mut self) -> Result<(), BoxError> {
//!         Ok(())
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemStruct};

mod component;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 组件注册宏
///
/// 为结构体生成 `component_descriptor()`，并通过 `ctor` 在程序启动前把它提交到全局组件目录。
/// 结构体需要实现 `Default`。
///
/// # 参数
///
/// - `name = "custom_name"` - 自定义 Bean 名称（默认由类型名首字母小写得到）
/// - `scope = "singleton" | "prototype"`，或直接写 `singleton` / `prototype`（默认单例）
/// - `bean_name_aware` - 实现了 `BeanNameAware`
/// - `initializing` - 实现了 `InitializingBean`
/// - `post_processor` - 实现了 `BeanPostProcessor`
///
/// # 字段
///
/// `#[autowired]` 标记依赖槽位，字段类型必须是 `Option<Arc<T>>`。槽位名称默认由字段名转为小驼峰
/// （`order_service` -> `orderService`），可用 `#[autowired(name = "...")]` 指定。
///
/// # 示例
///
/// ```rust,ignore
/// #[component(name = "orders", prototype)]
/// #[derive(Default)]
/// pub struct OrderService {
///     #[autowired]
///     user_service: Option<Arc<UserService>>,
/// }
/// ```
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    let component_args = parse_macro_input!(args as component::ComponentArgs);
    let input_struct = parse_macro_input!(input as ItemStruct);

    match component::expand(component_args, input_struct) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
