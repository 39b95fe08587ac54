//! 组件注册宏实现

use crate::utils::{camel_to_snake, extract_option_arc, snake_to_lower_camel};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, Attribute, Error, Expr, Fields,
    Ident, ItemStruct, Lit, LitStr, Meta, Result, Token, Type,
};

/// 组件配置参数
#[derive(Debug, Clone, Default)]
pub struct ComponentArgs {
    /// 自定义 Bean 名称
    pub name: Option<String>,
    /// 作用域
    pub scope: ComponentScope,
    /// 是否实现了 `BeanNameAware`
    pub bean_name_aware: bool,
    /// 是否实现了 `InitializingBean`
    pub initializing: bool,
    /// 是否为后置处理器
    pub post_processor: bool,
}

/// 组件作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentScope {
    #[default]
    Singleton,
    Prototype,
}

impl ComponentScope {
    fn parse_str(value: &str, span: Span) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "singleton" => Ok(Self::Singleton),
            "prototype" => Ok(Self::Prototype),
            other => Err(Error::new(
                span,
                format!("未知的作用域 `{}`，只支持 singleton 或 prototype", other),
            )),
        }
    }
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ComponentArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) => {
                    if path.is_ident("singleton") {
                        args.scope = ComponentScope::Singleton;
                    } else if path.is_ident("prototype") {
                        args.scope = ComponentScope::Prototype;
                    } else if path.is_ident("bean_name_aware") {
                        args.bean_name_aware = true;
                    } else if path.is_ident("initializing") {
                        args.initializing = true;
                    } else if path.is_ident("post_processor") {
                        args.post_processor = true;
                    } else {
                        return Err(Error::new_spanned(path, "未知的组件参数"));
                    }
                }
                Meta::NameValue(nv) => {
                    let value = string_value(&nv.value)?;
                    if nv.path.is_ident("name") {
                        if value.value().trim().is_empty() {
                            return Err(Error::new_spanned(value, "Bean 名称不能为空"));
                        }
                        args.name = Some(value.value());
                    } else if nv.path.is_ident("scope") {
                        args.scope = ComponentScope::parse_str(&value.value(), value.span())?;
                    } else {
                        return Err(Error::new_spanned(nv.path, "未知的组件参数"));
                    }
                }
                Meta::List(list) => {
                    return Err(Error::new_spanned(list, "未知的组件参数"));
                }
            }
        }

        Ok(args)
    }
}

fn string_value(expr: &Expr) -> Result<LitStr> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.clone()),
            other => Err(Error::new_spanned(other, "需要字符串字面量")),
        },
        other => Err(Error::new_spanned(other, "需要字符串字面量")),
    }
}

/// 依赖槽位
struct AutowiredField {
    field: Ident,
    slot: String,
    dependency: Type,
}

/// `#[autowired]` 或 `#[autowired(name = "...")]` 的参数
fn autowired_slot_name(attr: &Attribute, field: &Ident) -> Result<String> {
    match &attr.meta {
        Meta::Path(_) => Ok(snake_to_lower_camel(&field.to_string())),
        Meta::List(_) => {
            let mut name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().trim().is_empty() {
                        return Err(Error::new_spanned(value, "依赖槽位名称不能为空"));
                    }
                    name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("未知的 autowired 参数"))
                }
            })?;
            Ok(name.unwrap_or_else(|| snake_to_lower_camel(&field.to_string())))
        }
        Meta::NameValue(nv) => Err(Error::new_spanned(nv, "请使用 #[autowired(name = \"...\")]")),
    }
}

/// 收集并移除字段上的 `#[autowired]`
fn take_autowired_fields(item: &mut ItemStruct) -> Result<Vec<AutowiredField>> {
    let mut slots = Vec::new();

    let fields = match &mut item.fields {
        Fields::Named(named) => &mut named.named,
        Fields::Unnamed(unnamed) => {
            if let Some(field) = unnamed
                .unnamed
                .iter()
                .find(|f| f.attrs.iter().any(|a| a.path().is_ident("autowired")))
            {
                return Err(Error::new_spanned(field, "#[autowired] 只能用于具名字段"));
            }
            return Ok(slots);
        }
        Fields::Unit => return Ok(slots),
    };

    for field in fields.iter_mut() {
        let Some(pos) = field
            .attrs
            .iter()
            .position(|a| a.path().is_ident("autowired"))
        else {
            continue;
        };
        let attr = field.attrs.remove(pos);

        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let slot = autowired_slot_name(&attr, &ident)?;
        let dependency = extract_option_arc(&field.ty).cloned().ok_or_else(|| {
            Error::new_spanned(&field.ty, "#[autowired] 字段类型必须是 Option<Arc<T>>")
        })?;

        slots.push(AutowiredField {
            field: ident,
            slot,
            dependency,
        });
    }

    Ok(slots)
}

/// 展开 #[component]
pub fn expand(args: ComponentArgs, mut item: ItemStruct) -> Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(Error::new_spanned(&item.generics, "#[component] 不支持泛型结构体"));
    }

    let slots = take_autowired_fields(&mut item)?;
    let struct_name = &item.ident;
    let type_name = struct_name.to_string();

    let name_call = args.name.as_ref().map(|name| quote! { .name(#name) });
    let scope_variant = match args.scope {
        ComponentScope::Singleton => quote! { ::ioc_common::BeanScope::Singleton },
        ComponentScope::Prototype => quote! { ::ioc_common::BeanScope::Prototype },
    };
    let autowired_calls = slots.iter().map(|slot| {
        let AutowiredField {
            field,
            slot,
            dependency,
        } = slot;
        quote! {
            .autowired(#slot, |bean: &mut #struct_name, dependency: ::std::sync::Arc<#dependency>| {
                bean.#field = ::core::option::Option::Some(dependency);
            })
        }
    });
    let aware_call = args.bean_name_aware.then(|| quote! { .bean_name_aware() });
    let initializing_call = args.initializing.then(|| quote! { .initializing() });
    let post_processor_call = args.post_processor.then(|| quote! { .post_processor() });

    let registration_fn_name = Ident::new(
        &format!("__register_component_{}", camel_to_snake(&type_name)),
        Span::call_site(),
    );

    Ok(quote! {
        #item

        impl #struct_name {
            /// 由 `#[component]` 生成的组件描述符
            pub fn component_descriptor() -> ::ioc_common::BeanResult<::ioc_common::ComponentDescriptor> {
                ::ioc_common::ComponentDescriptor::builder::<#struct_name>()
                    .module_path(::core::module_path!())
                    #name_call
                    .scope(#scope_variant)
                    #(#autowired_calls)*
                    #aware_call
                    #initializing_call
                    #post_processor_call
                    .build()
            }
        }

        // 使用 ctor 在程序启动时把组件提交到全局目录
        #[::ctor::ctor]
        fn #registration_fn_name() {
            ::ioc_common::submit_component(::ioc_common::CatalogEntry {
                module_path: ::core::module_path!(),
                type_name: #type_name,
                factory: #struct_name::component_descriptor,
            });
        }
    })
}
