//! 约定规范定义
//!
//! 提供组件命名和扫描范围的约定规范

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 从类型名称推导默认 Bean 名称
    ///
    /// 首字母小写；若前两个字符均为大写则保持原样（`URLService` 不变）。
    pub fn default_bean_name(type_name: &str) -> String {
        let mut chars = type_name.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };

        if let Some(second) = chars.next() {
            if first.is_uppercase() && second.is_uppercase() {
                return type_name.to_string();
            }
        }

        let mut result = String::with_capacity(type_name.len());
        result.extend(first.to_lowercase());
        result.push_str(&type_name[first.len_utf8()..]);
        result
    }

    /// 验证 Bean 名称
    pub fn is_valid_bean_name(name: &str) -> bool {
        !name.trim().is_empty()
    }
}

/// 扫描约定规范
#[derive(Debug)]
pub struct ScanConventions;

impl ScanConventions {
    /// 检查模块路径是否位于扫描根路径之下
    ///
    /// 空的根路径匹配所有模块，匹配按路径段进行（`app::svc` 不匹配 `app::svc2`）。
    pub fn in_base_package(module_path: &str, base_package: &str) -> bool {
        if base_package.is_empty() {
            return true;
        }

        match module_path.strip_prefix(base_package) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }

    /// 验证扫描根路径
    pub fn validate_base_package(base_package: &str) -> bool {
        if base_package.is_empty() {
            return true;
        }

        base_package
            .split("::")
            .all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            })
    }
}
