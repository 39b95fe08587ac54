//! 错误类型定义

use thiserror::Error;

/// 用户回调（工厂、初始化方法）返回的通用错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 容器运行时错误类型
#[derive(Error, Debug)]
pub enum BeanError {
    #[error("Bean 未定义: {name}")]
    BeanNotDefined { name: String },

    #[error("Bean 名称重复: {name}, 已注册类型 {existing_type}, 新类型 {new_type}")]
    DuplicateBeanName {
        name: String,
        existing_type: String,
        new_type: String,
    },

    #[error("Bean 实例化失败: {name} ({type_name}), 原因: {source}")]
    InstantiationFailure {
        name: String,
        type_name: String,
        source: BoxError,
    },

    #[error("依赖类型不匹配: {bean}.{slot}, 期望 {expected}")]
    DependencyTypeMismatch {
        bean: String,
        slot: String,
        expected: String,
    },

    #[error("Bean 初始化失败: {name}, 原因: {source}")]
    InitializationFailure { name: String, source: BoxError },

    #[error("Bean 类型不符: {name}, 期望 {expected}, 实际 {actual}")]
    BeanNotOfRequiredType {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("依赖注入失败: {bean}.{slot}")]
    UnsatisfiedDependency {
        bean: String,
        slot: String,
        #[source]
        source: Box<BeanError>,
    },

    #[error("Bean 正在创建中: {name}, 创建链: {chain}")]
    CurrentlyInCreation { name: String, chain: String },

    #[error("组件描述符无效: {message}")]
    InvalidDescriptor { message: String },
}

impl BeanError {
    /// 创建未定义错误
    pub fn not_defined(name: impl Into<String>) -> Self {
        Self::BeanNotDefined { name: name.into() }
    }

    /// 创建描述符无效错误
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            message: message.into(),
        }
    }

    /// 沿 `UnsatisfiedDependency` 链找到最内层的错误
    pub fn root_cause(&self) -> &BeanError {
        let mut current = self;
        while let Self::UnsatisfiedDependency { source, .. } = current {
            current = source;
        }
        current
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}, 原因: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML 配置解析失败: {source}")]
    TomlParseError {
        #[from]
        source: toml::de::Error,
    },

    #[error("JSON 配置解析失败: {source}")]
    JsonParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("不支持的配置文件格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 容器启动错误类型
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("容器错误: {source}")]
    BeanError {
        #[from]
        source: BeanError,
    },

    #[error("日志初始化失败: {message}")]
    LoggingInit { message: String },
}

/// 结果类型别名
pub type BeanResult<T> = Result<T, BeanError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ContextResult<T> = Result<T, ContextError>;
