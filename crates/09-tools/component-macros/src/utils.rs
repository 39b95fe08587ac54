//! 宏工具函数

use syn::{GenericArgument, PathArguments, Type};

/// 从类型中提取第一个泛型参数，要求最后一段路径名为 `wrapper`
pub fn extract_generic_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }

    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// 提取 `Option<Arc<T>>` 中的 `T`
pub fn extract_option_arc(ty: &Type) -> Option<&Type> {
    extract_generic_type(ty, "Option").and_then(|inner| extract_generic_type(inner, "Arc"))
}

/// 蛇形命名转为小驼峰：`order_service` -> `orderService`
pub fn snake_to_lower_camel(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    let mut result = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if ch == '_' {
            // 开头的下划线没有可以大写的前一个单词
            upper_next = !result.is_empty();
            continue;
        }
        if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// 驼峰命名转为蛇形：`UserService` -> `user_service`
pub fn camel_to_snake(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
