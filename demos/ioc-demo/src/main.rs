//! # IoC 演示程序
//!
//! 从类路径发现 `ioc_demo.services` 包中的类型，完成配置注入和实例注入后
//! 打印启动结果。

mod services;

use anyhow::Context;
use clap::Parser;
use di_abstractions::Ioc;
use infrastructure_composition::{ClassPath, DynamicContext, IocBuilder};
use services::{AuditLog, GreetingService};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "ioc-demo")]
#[command(about = "Lorn IoC 演示程序")]
struct Args {
    /// 类路径，多个条目使用平台路径分隔符连接
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))]
    class_path: String,

    /// 要扫描的包，可以重复指定
    #[arg(short, long = "package", default_value = "ioc_demo.services")]
    packages: Vec<String>,

    /// 配置文件路径
    #[arg(short, long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/app.properties"))]
    config: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 遇到未登记的类型时启动失败
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志，RUST_LOG 优先
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动 IoC 演示程序");

    let mut builder = IocBuilder::new()
        .add_optional_config_file(&args.config)
        .add_config_env_vars("IOC_DEMO")
        .with_class_path(ClassPath::parse(&args.class_path))
        .probe_type::<GreetingService>()
        .strict(args.strict);
    for package in &args.packages {
        builder = builder.scan_package(package.as_str());
    }

    let application = builder.build().context("IoC 容器启动失败")?;
    let report = application.report();
    info!(
        "发现 {} 个类型，注册 {} 个，跳过 {:?}，运行环境: {}",
        report.discovered,
        report.registered.len(),
        report.skipped,
        if DynamicContext::is_jar_context() { "归档" } else { "目录" }
    );
    for name in &report.registered {
        println!("已注册: {}", name);
    }

    if let Some(service) = application.get_bean::<GreetingService>() {
        for line in service.greet_all() {
            println!("{}", line);
        }
    }
    if let Some(audit) = application.get_bean::<AuditLog>() {
        audit.record("演示完成");
    }

    info!("注册表中共有 {} 个名称", application.ioc().len());
    Ok(())
}
