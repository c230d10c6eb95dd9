//! IoC 应用构建器

use crate::bootstrapper::{BootstrapReport, IocBootstrapper};
use crate::class_path::ClassPath;
use crate::dynamic_context::DynamicContext;
use config_impl::{EnvironmentBuilder, PropertiesEnvironment};
use di_abstractions::{Ioc, IocExt};
use di_impl::{IocConfig, SimpleIoc, TypeCatalog};
use infrastructure_common::{InfrastructureError, InfrastructureResult, TypeInfo};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// IoC 应用构建器
///
/// 使用建造者模式组装配置源、类路径和扫描包，然后完成启动
pub struct IocBuilder {
    /// 配置环境构建器
    environment: EnvironmentBuilder,
    /// 类路径
    class_path: ClassPath,
    /// 扫描的包
    packages: Vec<String>,
    /// 注册表配置
    ioc_config: IocConfig,
    /// 是否使用严格模式启动
    strict: bool,
    /// 用于判断运行环境的包
    probe_package: Option<String>,
    /// 类型目录
    catalog: &'static TypeCatalog,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl IocBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            environment: EnvironmentBuilder::new(),
            class_path: ClassPath::new(),
            packages: Vec::new(),
            ioc_config: IocConfig::default(),
            strict: false,
            probe_package: None,
            catalog: TypeCatalog::global(),
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加配置文件
    pub fn add_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("添加配置文件: {}", path.display());
        self.environment = self.environment.add_file(path);
        self
    }

    /// 添加可选的配置文件
    pub fn add_optional_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.environment = self.environment.add_optional_file(path);
        self
    }

    /// 添加环境变量配置源
    pub fn add_config_env_vars(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        info!("添加环境变量配置源，前缀: {}", prefix);
        self.environment = self.environment.add_env_vars(prefix);
        self
    }

    /// 设置单个配置项
    pub fn set_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment = self.environment.set(key, value);
        self
    }

    /// 追加类路径根目录或归档
    pub fn add_class_path(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!("添加类路径: {}", root.display());
        self.class_path.add_root(root);
        self
    }

    /// 使用指定的类路径
    pub fn with_class_path(mut self, class_path: ClassPath) -> Self {
        self.class_path = class_path;
        self
    }

    /// 添加要扫描的包
    pub fn scan_package(mut self, package_name: impl Into<String>) -> Self {
        self.packages.push(package_name.into());
        self
    }

    /// 配置注册表
    pub fn with_ioc_config(mut self, config: IocConfig) -> Self {
        self.ioc_config = config;
        self
    }

    /// 严格模式：空包和未登记的类型会导致启动失败
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 启动时按类型 `T` 所在包的位置设置进程级的归档标记
    pub fn probe_type<T: ?Sized + 'static>(self) -> Self {
        self.probe_package(TypeInfo::of::<T>().package_name())
    }

    /// 启动时按包的位置设置进程级的归档标记
    pub fn probe_package(mut self, package_name: impl Into<String>) -> Self {
        self.probe_package = Some(package_name.into());
        self
    }

    /// 使用指定的类型目录
    pub fn with_catalog(mut self, catalog: &'static TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建并启动 IoC 应用
    pub fn build(self) -> InfrastructureResult<IocApplication> {
        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.initialize_logging()?;
        }
        info!("开始构建 IoC 应用");

        let environment = Arc::new(self.environment.build()?);
        let context = Arc::new(DynamicContext::new(Arc::new(self.class_path)));
        if let Some(package_name) = &self.probe_package {
            let is_jar = context.init_for_package(package_name);
            debug!("按包 {} 判断运行环境, 归档: {}", package_name, is_jar);
        }
        let ioc = Arc::new(SimpleIoc::with_config(self.ioc_config));

        let report = IocBootstrapper::new(&context, self.catalog)
            .with_packages(self.packages)
            .strict(self.strict)
            .bootstrap(ioc.as_ref(), environment.as_ref())?;

        info!("IoC 应用构建完成，共 {} 个 Bean 名称", ioc.len());
        Ok(IocApplication {
            ioc,
            environment,
            context,
            report,
        })
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> InfrastructureResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(self.logging_config.env_filter())
            .with_target(self.logging_config.show_target)
            .with_file(self.logging_config.show_location)
            .with_line_number(self.logging_config.show_location);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for IocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 启动完成的 IoC 应用
pub struct IocApplication {
    ioc: Arc<SimpleIoc>,
    environment: Arc<PropertiesEnvironment>,
    context: Arc<DynamicContext>,
    report: BootstrapReport,
}

impl IocApplication {
    /// Bean 注册表
    pub fn ioc(&self) -> Arc<SimpleIoc> {
        Arc::clone(&self.ioc)
    }

    /// 配置环境
    pub fn environment(&self) -> Arc<PropertiesEnvironment> {
        Arc::clone(&self.environment)
    }

    /// 类型发现调度器
    pub fn context(&self) -> Arc<DynamicContext> {
        Arc::clone(&self.context)
    }

    /// 启动结果
    pub fn report(&self) -> &BootstrapReport {
        &self.report
    }

    /// 按类型获取 Bean
    pub fn get_bean<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.ioc.get_bean::<T>()
    }
}

/// 注册表、注入和类型发现所在的日志目标
const IOC_TARGETS: [&str; 4] = [
    "di_abstractions",
    "di_impl",
    "config_impl",
    "infrastructure_composition",
];

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 全局日志级别
    pub level: tracing::Level,
    /// IoC 相关 crate 的日志级别
    pub ioc_level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示文件名和行号
    pub show_location: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            ioc_level: tracing::Level::INFO,
            show_target: true,
            show_location: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 开发环境：输出注册、注入和扫描的调试日志
    pub fn development() -> Self {
        Self {
            level: tracing::Level::INFO,
            ioc_level: tracing::Level::DEBUG,
            show_target: true,
            show_location: true,
            json_format: false,
        }
    }

    /// 生产环境：只保留启动摘要和告警，使用 JSON 输出
    pub fn production() -> Self {
        Self {
            level: tracing::Level::WARN,
            ioc_level: tracing::Level::INFO,
            show_target: false,
            show_location: false,
            json_format: true,
        }
    }

    /// 过滤指令，例如 `info,di_impl=debug`
    pub fn directives(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        let ioc_level = self.ioc_level.as_str().to_lowercase();
        std::iter::once(level)
            .chain(
                IOC_TARGETS
                    .iter()
                    .map(|target| format!("{}={}", target, ioc_level)),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_abstractions::Environment;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_with_empty_class_path() {
        let application = IocBuilder::new()
            .set_property("app.name", "demo")
            .scan_package("nothing.here")
            .build()
            .unwrap();

        assert_eq!(application.report().discovered, 0);
        assert!(application.ioc().is_empty());
        assert_eq!(
            application.environment().get("app.name").as_deref(),
            Some("demo")
        );
    }

    #[test]
    fn test_unknown_entries_are_skipped() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("demo/beans")).unwrap();
        fs::write(root.path().join("demo/beans/Ghost.type"), "").unwrap();

        let application = IocBuilder::new()
            .add_class_path(root.path())
            .scan_package("demo")
            .build()
            .unwrap();

        assert_eq!(application.report().discovered, 1);
        assert_eq!(application.report().skipped, vec!["demo.beans.Ghost"]);

        let strict = IocBuilder::new()
            .add_class_path(root.path())
            .scan_package("demo")
            .strict(true)
            .build();
        assert!(matches!(strict, Err(InfrastructureError::ComponentError { .. })));
    }

    #[test]
    fn test_missing_config_file_fails() {
        let result = IocBuilder::new()
            .add_config_file("/definitely/not/here.toml")
            .build();

        assert!(matches!(result, Err(InfrastructureError::ConfigError { .. })));
    }

    #[test]
    fn test_logging_presets() {
        assert_eq!(LoggingConfig::development().ioc_level, tracing::Level::DEBUG);
        assert!(LoggingConfig::production().json_format);
        assert!(!LoggingConfig::default().json_format);
    }

    #[test]
    fn test_logging_directives_target_ioc_crates() {
        let directives = LoggingConfig::production().directives();

        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("di_impl=info"));
        assert!(directives.contains("infrastructure_composition=info"));
        assert_eq!(
            LoggingConfig::development().directives().matches("=debug").count(),
            IOC_TARGETS.len()
        );
    }
}
