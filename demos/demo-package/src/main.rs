//! # 示例应用程序
//!
//! 演示如何通过组件宏和应用上下文装配服务

mod processors;
mod services;

use anyhow::Context;
use clap::Parser;
use ioc_composition::{ApplicationContext, ContainerConfig, LoggingConfig};
use services::UserService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "demo-package")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 配置文件路径（TOML 或 JSON），未指定时使用命令行参数
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 扫描根路径
    #[arg(long, default_value = "demo_package")]
    base_package: String,

    /// 在创建任何单例之前注册全部后置处理器
    #[arg(long)]
    post_processors_first: bool,

    /// 获取 userService 的次数
    #[arg(short, long, default_value_t = 2)]
    requests: usize,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 输出启动报告
    #[arg(long)]
    json_report: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ContainerConfig::from_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => ContainerConfig {
            base_package: args.base_package.clone(),
            post_processors_first: args.post_processors_first,
            ..ContainerConfig::default()
        },
    };

    let context = ApplicationContext::builder()
        .with_config(config)
        .with_catalog_scanner()
        .with_logging(LoggingConfig::default().with_level(parse_log_level(&args.log_level)))
        .build()
        .context("启动应用上下文失败")?;

    info!("启动 Lorn IoC 示例应用, 上下文 {}", context.id());

    let mut users: Vec<Arc<UserService>> = Vec::with_capacity(args.requests);
    for _ in 0..args.requests {
        users.push(context.get_bean_typed::<UserService>("userService")?);
    }

    for (i, user) in users.iter().enumerate() {
        info!(
            "userService #{}: beanName={}, {}",
            i,
            user.bean_name(),
            user.checkout("book").unwrap_or_else(|| "no order service".to_string())
        );
    }

    if let [first, second, ..] = users.as_slice() {
        let same_order_service = match (first.order_service(), second.order_service()) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        info!(
            "两次获取 userService 是否为同一实例: {}, orderService 是否为同一实例: {}",
            Arc::ptr_eq(first, second),
            same_order_service
        );
    }

    if args.json_report {
        println!("{}", serde_json::to_string_pretty(context.report())?);
    } else {
        let report = context.report();
        info!(
            "启动报告: {} 个 Bean, {} 个后置处理器, {} 个单例, 跳过 {} 个",
            report.registered,
            report.post_processors,
            report.eager_singletons,
            report.skipped.len()
        );
    }

    Ok(())
}

fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
