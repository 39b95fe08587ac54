//! 容器配置定义

use crate::conventions::ScanConventions;
use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 容器配置
///
/// 指定扫描根路径和启动策略，可从 TOML 或 JSON 文件加载。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 扫描根路径（模块路径前缀），为空时扫描全部组件
    pub base_package: String,
    /// 是否允许同名描述符覆盖已注册的描述符
    pub allow_bean_definition_overriding: bool,
    /// 发现阶段出错时是否中止启动
    pub fail_fast: bool,
    /// 是否在创建任何单例之前注册全部后置处理器
    pub post_processors_first: bool,
    /// 启动时是否预先创建单例
    pub eager_singletons: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            base_package: String::new(),
            allow_bean_definition_overriding: false,
            fail_fast: false,
            post_processors_first: false,
            eager_singletons: true,
        }
    }
}

impl ContainerConfig {
    /// 创建指定扫描根路径的配置
    pub fn with_base_package(base_package: impl Into<String>) -> Self {
        Self {
            base_package: base_package.into(),
            ..Self::default()
        }
    }

    /// 从文件加载配置，按扩展名选择格式
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// 从 TOML 字符串加载配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 字符串加载配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !ScanConventions::validate_base_package(&self.base_package) {
            return Err(ConfigError::ValidationError {
                message: format!("扫描根路径无效: {}", self.base_package),
            });
        }
        Ok(())
    }
}
